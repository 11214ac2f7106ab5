fn normalize_token(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let m = b.len();
    if a.is_empty() {
        return m;
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0; m + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }
    prev[m]
}

fn score_candidate(input: &str, candidate: &str) -> usize {
    let a = normalize_token(input);
    let b = normalize_token(candidate);
    if a.is_empty() || b.is_empty() {
        return usize::MAX;
    }
    if a == b {
        return 0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 1;
    }
    levenshtein(&a, &b)
}

fn max_allowed_distance(input: &str) -> usize {
    match normalize_token(input).len() {
        0 => 0,
        1..=4 => 1,
        5..=8 => 2,
        _ => 3,
    }
}

/// Returns up to `limit` candidates close enough to `input` to plausibly be
/// what the caller meant, best matches first.
pub fn suggest(input: &str, candidates: &[String], limit: usize) -> Vec<String> {
    let cutoff = max_allowed_distance(input);
    if cutoff == 0 {
        return Vec::new();
    }
    let mut scored: Vec<(usize, &String)> = candidates
        .iter()
        .map(|candidate| (score_candidate(input, candidate), candidate))
        .filter(|(score, _)| *score <= cutoff)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::suggest;

    fn names() -> Vec<String> {
        ["zoho_list_tickets", "zoho_get_ticket", "zoho_list_contacts"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn suggest_catches_a_typo() {
        let out = suggest("zoho_list_ticket", &names(), 3);
        assert_eq!(out.first().map(String::as_str), Some("zoho_list_tickets"));
    }

    #[test]
    fn suggest_rejects_distant_input() {
        assert!(suggest("completely_unrelated_name", &names(), 3).is_empty());
    }
}
