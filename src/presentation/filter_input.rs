// Filter form adapter - parses submitted filter lines into field pairs
//
// Stands in for the dashboard's filter form: one submitted line holds
// whitespace-separated `name=value` tokens whose names become query-parameter
// names verbatim. Values may be empty ("no filter on this field"); dropping
// those is the fetch controller's job, not ours.

pub fn parse_filter_fields(line: &str) -> Vec<(String, String)> {
    line.split_whitespace()
        .filter_map(|token| match token.split_once('=') {
            Some((name, value)) if !name.is_empty() => {
                Some((name.to_string(), value.to_string()))
            }
            _ => {
                tracing::warn!("ignoring malformed filter token '{}'", token);
                None
            }
        })
        .collect()
}
