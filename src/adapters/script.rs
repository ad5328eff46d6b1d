use crate::domain::event::Step;
use crate::utils::error::{Result, SiteError};
use std::path::Path;

/// 讀取事件腳本（JSON Lines）
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<Step>> {
    let content = std::fs::read_to_string(path)?;
    parse_script(&content)
}

/// One JSON object per line. Blank lines and `//` comments are skipped.
pub fn parse_script(content: &str) -> Result<Vec<Step>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("//")
        })
        .map(|(index, line)| {
            serde_json::from_str::<Step>(line).map_err(|e| SiteError::ScriptError {
                line: index + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{Event, TimerKind};
    use crate::domain::model::{FieldValue, FormKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_mixed_script() {
        let script = r#"
// open the menu, then wait for autoplay
{"event": "menu_toggle_clicked"}
{"wait_ms": 5000}
{"event": "field_input", "form": "contact", "field": "terms", "value": true}
{"event": "field_input", "form": "contact", "field": "name", "value": "Jane"}
{"event": "timer_fired", "timer": {"submit_delay": "appointment"}}
"#;
        let steps = parse_script(script).unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], Step::Event(Event::MenuToggleClicked));
        assert_eq!(steps[1], Step::Wait { wait_ms: 5000 });
        assert_eq!(
            steps[2],
            Step::Event(Event::FieldInput {
                form: FormKind::Contact,
                field: "terms".to_string(),
                value: FieldValue::Checked(true),
            })
        );
        assert_eq!(
            steps[4],
            Step::Event(Event::TimerFired {
                timer: TimerKind::SubmitDelay(FormKind::Appointment)
            })
        );
    }

    #[test]
    fn test_parse_reports_line_number() {
        let script = "{\"event\": \"menu_toggle_clicked\"}\n{\"event\": \"teleport\"}\n";
        match parse_script(script) {
            Err(SiteError::ScriptError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected script error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_script_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{{\"event\": \"back_to_top_clicked\"}}").unwrap();
        writeln!(temp_file, "{{\"event\": \"scroll\", \"y\": 420.5}}").unwrap();

        let steps = load_script(temp_file.path()).unwrap();
        assert_eq!(steps[1], Step::Event(Event::Scroll { y: 420.5 }));
    }
}
