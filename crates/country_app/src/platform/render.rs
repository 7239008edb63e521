use country_core::{CountryRowView, ListViewModel};

/// One unit of terminal output produced from a view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// Regular output on stdout.
    Line(String),
    /// Transient notice on stderr.
    Notice(String),
}

pub fn render(view: &ListViewModel) -> Vec<TerminalCommand> {
    let mut cmds = Vec::new();

    if view.spinner_visible {
        cmds.push(TerminalCommand::Line("Loading countries...".to_string()));
    }

    if view.total_rows > 0 {
        let last = view.rows.last().map_or(view.scroll_offset, |row| row.index);
        cmds.push(TerminalCommand::Line(format!(
            "Countries {}-{} of {}",
            view.scroll_offset + 1,
            last + 1,
            view.total_rows
        )));
        cmds.extend(view.rows.iter().map(|row| TerminalCommand::Line(format_row(row))));
    } else if !view.spinner_visible && view.notice.is_none() {
        cmds.push(TerminalCommand::Line("No countries.".to_string()));
    }

    if let Some(notice) = &view.notice {
        let text = if notice.is_empty() {
            "error: request failed".to_string()
        } else {
            format!("error: {notice}")
        };
        cmds.push(TerminalCommand::Notice(text));
    }

    cmds
}

fn format_row(row: &CountryRowView) -> String {
    format!(
        "{index:>4}  {title:<40} {code:<4} {capital}",
        index = row.index + 1,
        title = row.title,
        code = row.code,
        capital = row.capital
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(index: usize, title: &str, code: &str, capital: &str) -> CountryRowView {
        CountryRowView {
            index,
            title: title.to_string(),
            code: code.to_string(),
            capital: capital.to_string(),
        }
    }

    #[test]
    fn loading_view_shows_spinner_line_only() {
        let view = ListViewModel {
            spinner_visible: true,
            ..ListViewModel::default()
        };
        assert_eq!(
            render(&view),
            vec![TerminalCommand::Line("Loading countries...".to_string())]
        );
    }

    #[test]
    fn rows_render_with_header() {
        let view = ListViewModel {
            rows: vec![row(2, "Chile, SA", "CL", "Santiago")],
            total_rows: 5,
            scroll_offset: 2,
            ..ListViewModel::default()
        };
        let cmds = render(&view);
        assert_eq!(cmds[0], TerminalCommand::Line("Countries 3-3 of 5".to_string()));
        let TerminalCommand::Line(line) = &cmds[1] else {
            panic!("expected a row line");
        };
        assert!(line.starts_with("   3  Chile, SA"));
        assert!(line.ends_with("CL   Santiago"));
    }

    #[test]
    fn notice_goes_to_stderr() {
        let view = ListViewModel {
            notice: Some("Response from server is null".to_string()),
            ..ListViewModel::default()
        };
        assert_eq!(
            render(&view),
            vec![TerminalCommand::Notice(
                "error: Response from server is null".to_string()
            )]
        );
    }

    #[test]
    fn empty_notice_gets_generic_text() {
        let view = ListViewModel {
            notice: Some(String::new()),
            ..ListViewModel::default()
        };
        assert_eq!(
            render(&view),
            vec![TerminalCommand::Notice("error: request failed".to_string())]
        );
    }

    #[test]
    fn empty_success_says_so() {
        let view = ListViewModel::default();
        assert_eq!(
            render(&view),
            vec![TerminalCommand::Line("No countries.".to_string())]
        );
    }
}
