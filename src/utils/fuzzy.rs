// Fuzzy matching for column-name suggestions

/// Levenshtein distance between two strings
/// (minimum single-character insertions, deletions and substitutions)
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row of the edit matrix
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest column names close to `input`
///
/// Case-insensitive. Prefix matches ("tue" -> "Tuesday") always qualify;
/// otherwise the edit distance must be within `max_distance`.
/// Returns up to 3 names, closest first.
pub fn suggest_columns(input: &str, candidates: &[&str], max_distance: usize) -> Vec<String> {
    let wanted = input.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(usize, &str)> = candidates
        .iter()
        .filter_map(|candidate| {
            let lower = candidate.to_lowercase();
            if lower.starts_with(&wanted) {
                return Some((0, *candidate));
            }
            let distance = levenshtein_distance(&wanted, &lower);
            (distance <= max_distance).then_some((distance, *candidate))
        })
        .collect();

    matches.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    matches.into_iter().take(3).map(|(_, name)| name.to_string()).collect()
}

/// Resolve a column name case-insensitively ("tuesday" -> "Tuesday")
pub fn resolve_column<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let wanted = input.trim();
    candidates
        .iter()
        .find(|c| **c == wanted)
        .or_else(|| candidates.iter().find(|c| c.eq_ignore_ascii_case(wanted)))
        .copied()
}
