/// Largest edit distance still accepted as a correction.
pub const MAX_EDITS: usize = 1;

/// Optimal string alignment distance between two strings.
///
/// Counts insertions, deletions, substitutions and transpositions of adjacent
/// characters. Unlike unrestricted Damerau-Levenshtein, a substring is never
/// edited twice, so `"ca"` -> `"abc"` costs 3 here rather than 2. Only the
/// `<= 1` boundary matters for corrections and both variants agree on it.
///
/// Complexity: O(n * m) time and space for inputs of `n` and `m` chars.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    distance_chars(&a, &b)
}

/// Whether `a` can be turned into `b` with at most one edit.
pub fn within_one(a: &str, b: &str) -> bool {
    distance(a, b) <= MAX_EDITS
}

/// [`distance`] over pre-split characters, used by the trie traversal which
/// slices the query many times per lookup.
pub(crate) fn distance_chars(a: &[char], b: &[char]) -> usize {
    let (a_len, b_len) = (a.len(), b.len());

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Row/column 0 stand for the empty prefix, so `table[i + 1][j + 1]`
    // is the distance between `a[..=i]` and `b[..=j]`.
    let mut table = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            let mut best = (table[i - 1][j] + 1) // deletion
                .min(table[i][j - 1] + 1) // insertion
                .min(table[i - 1][j - 1] + cost); // substitution

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(table[i - 2][j - 2] + 1); // transposition
            }

            table[i][j] = best;
        }
    }

    table[a_len][b_len]
}
