/// Group ids are networked strings capped at 128 bytes; comparisons never
/// look past that bound.
pub(crate) const MAX_GROUP_ID: usize = 128;

/// ASCII case-insensitive match over the bounded prefix. Empty ids never
/// match anything; ungrouped surfaces are always their own masters.
pub(crate) fn group_ids_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    bounded(a).eq_ignore_ascii_case(bounded(b))
}

fn bounded(s: &str) -> &[u8] {
    let bytes = s.as_bytes();
    &bytes[..bytes.len().min(MAX_GROUP_ID)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_ascii_case() {
        assert!(group_ids_match("Lobby", "lobby"));
        assert!(group_ids_match("WALL-3", "wall-3"));
        assert!(!group_ids_match("lobby", "atrium"));
    }

    #[test]
    fn empty_ids_never_match() {
        assert!(!group_ids_match("", ""));
        assert!(!group_ids_match("lobby", ""));
    }

    #[test]
    fn comparison_stops_at_the_byte_bound() {
        let prefix = "g".repeat(MAX_GROUP_ID);
        let a = format!("{prefix}alpha");
        let b = format!("{prefix}beta");
        assert!(group_ids_match(&a, &b));
    }
}
