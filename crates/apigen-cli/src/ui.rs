//! Terminal output for the apigen CLI.

use console::style;

use apigen_compiler::GenerateResult;

/// One-line summary printed after a successful run.
pub fn summary(output: &str, result: &GenerateResult) -> String {
    format!(
        "{} {} {}",
        style("\u{25C6}").cyan(),
        style(output).bold(),
        style(format!(
            "({} {}, {} {}, {} error {})",
            result.handlers,
            plural(result.handlers, "handler", "handlers"),
            result.groups,
            plural(result.groups, "group", "groups"),
            result.error_payloads,
            plural(result.error_payloads, "payload", "payloads"),
        ))
        .dim()
    )
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        console::set_colors_enabled(false);
        let line = summary(
            "src/api/handlers.rs",
            &GenerateResult {
                groups: 2,
                handlers: 3,
                error_payloads: 1,
            },
        );
        assert_eq!(line, "\u{25C6} src/api/handlers.rs (3 handlers, 2 groups, 1 error payload)");
    }
}
