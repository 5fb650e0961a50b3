use super::CommandDef;

pub(super) fn score_match(q: &str, candidate: &str) -> i32 {
    let q = q.to_lowercase();
    let c = candidate.to_lowercase();
    if c == q {
        return 100;
    }
    if c.starts_with(&q) {
        return 50 - (c.len() as i32 - q.len() as i32);
    }
    if c.contains(&q) {
        return 10;
    }
    0
}

/// Commands matching the first word of `query`, best first. Aliases count
/// toward the score; definition order breaks ties.
pub(super) fn rank_commands(query: &str, defs: &[CommandDef]) -> Vec<CommandDef> {
    let q = query.trim().trim_start_matches('/');
    let Some(first) = q.split_whitespace().next() else {
        return Vec::new();
    };
    let mut scored: Vec<(i32, usize, CommandDef)> = defs
        .iter()
        .enumerate()
        .filter_map(|(i, d)| {
            let best = std::iter::once(d.name)
                .chain(d.aliases.iter().copied())
                .map(|c| score_match(first, c))
                .max()
                .unwrap_or(0);
            (best > 0).then_some((best, i, *d))
        })
        .collect();
    scored.sort_by(|(sa, ia, _), (sb, ib, _)| sb.cmp(sa).then_with(|| ia.cmp(ib)));
    scored.into_iter().map(|(_, _, d)| d).collect()
}

#[cfg(test)]
#[path = "../tests/tui_shell/suggest_tests.rs"]
mod tests;
