//! Match-token generation for launcher filtering.

/// Generate the filter tokens for a decoded job name.
///
/// The name splits on spaces and slashes into parts; each part splits
/// again on hyphens and underscores into segments. Per part the emitted
/// order is the part itself, an acronym of segment initials when there
/// are at least three segments, then the segments. Duplicates collapse
/// within a part but are kept across parts, so ancestor token lists can
/// be appended verbatim later.
pub fn match_tokens(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for part in name.split([' ', '/']) {
        push_part_tokens(part, &mut tokens);
    }
    tokens
}

fn push_part_tokens(part: &str, tokens: &mut Vec<String>) {
    let segments: Vec<&str> = part.split(['-', '_']).collect();

    let mut candidates: Vec<String> = Vec::with_capacity(segments.len() + 2);
    candidates.push(part.to_string());
    if segments.len() >= 3 {
        let acronym: String = segments
            .iter()
            .filter_map(|segment| segment.chars().next())
            .collect();
        candidates.push(acronym);
    }
    candidates.extend(segments.iter().map(|segment| segment.to_string()));

    let start = tokens.len();
    for candidate in candidates {
        if candidate.is_empty() || tokens[start..].contains(&candidate) {
            continue;
        }
        tokens.push(candidate);
    }
}
