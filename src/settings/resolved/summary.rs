use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	for line in summary_lines(config) {
		println!("{line}");
	}
}

fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
	vec![
		"Effective configuration:".to_string(),
		format!("  Venue: {}", config.venue_name),
		format!("  Data file: {}", config.data_file.display()),
		format!("  Role: {}", config.role.as_str()),
		format!("  Debounce: {} ms", config.search.debounce.as_millis()),
		format!(
			"  Minimum query length: {} {}",
			config.search.min_query_len,
			plural(config.search.min_query_len, "character", "characters")
		),
		format!("  Suggestion limit: {}", config.search.suggestion_limit),
	]
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
	if count == 1 { one } else { many }
}
