/// Normalize a technology name for comparison: lower-case with all
/// whitespace removed, so "Node JS", "node js" and "nodejs" compare equal.
///
/// Every ranking path (event ranking, fallback scoring, AI-response
/// validation) must use this same rule.
#[inline]
pub fn normalize_tech(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
