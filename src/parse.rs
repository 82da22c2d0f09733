/// Parse a comma-separated ID list, keeping only tokens that are whole
/// integers. Order is preserved; invalid tokens are silently dropped.
pub fn parse_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect()
}
