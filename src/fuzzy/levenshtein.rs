//! Levenshtein edit distance

/// Edit distance between `a` and `b` with unit insertion, deletion and
/// substitution costs, over Unicode scalar values.
///
/// Fills the full `(|b| + 1) x (|a| + 1)` table; resume keywords and word
/// windows are short.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut mat = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (col, cell) in mat[0].iter_mut().enumerate() {
        *cell = col;
    }
    for (row, cells) in mat.iter_mut().enumerate() {
        cells[0] = row;
    }

    for row in 1..=b.len() {
        for col in 1..=a.len() {
            let substitution = if a[col - 1] == b[row - 1] { 0 } else { 1 };
            mat[row][col] = (mat[row - 1][col] + 1)
                .min(mat[row][col - 1] + 1)
                .min(mat[row - 1][col - 1] + substitution);
        }
    }

    mat[b.len()][a.len()]
}
