/*
Inputs:

    clipboard text (source type simple name)

    editor selection (target type simple name)

    import list + type field tables

    caret line of the open buffer

Outputs:

    one assignment per target field, inserted below the caret line

    RunReport (binding, statements, final cursor, notes)

Responsibilities:

    Validate every input before the first buffer mutation

    Surface each stop through the Notifier (warn for missing input, error otherwise)

    Insert in one pass, move the caret, commit once
*/
use log::debug;

use crate::core::error::{BridgeError, MissingInput};
use crate::core::insert::{insert_all, insertion_start, leading_indent, TextBuffer};
use crate::core::matching::{match_fields, unmatched_source_fields};
use crate::core::naming::{derive_source_object_name, derive_target_object_name};
use crate::core::statement::generate_with_style;
use crate::core::types::{GeneratedStatement, ObjectBinding};
use crate::mapping::config::{AmbiguityPolicy, BridgeConfig};
use crate::mapping::host::{Clipboard, Editor, ImportIndex, Notifier, TypeIndex};
use crate::mapping::imports::lookup_import;

/// Everything computed before touching the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub source_type: String,
    pub target_type: String,
    pub binding: ObjectBinding,
    pub statements: Vec<GeneratedStatement>,
    pub anchor_line: usize,
    pub anchor_indent: String,
    pub anchor_line_end_offset: usize,
    /// Anchor is the unterminated last line; a line terminator goes in first.
    pub terminate_anchor: bool,
    /// Statements that read from the source object.
    pub copied: usize,
    pub unmatched_source: Vec<String>,
    pub notes: Vec<String>,
}

impl Plan {
    pub fn placeholders(&self) -> usize {
        self.statements.len() - self.copied
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub plan: Plan,
    /// Start of the last inserted line; `None` when nothing was inserted.
    pub cursor: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct BridgeAction {
    config: BridgeConfig,
}

impl BridgeAction {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Validate inputs and build the statements without mutating anything.
    pub fn plan<H, E, N>(&self, host: &H, editor: &E, notifier: &N) -> Result<Plan, BridgeError>
    where
        H: Clipboard + ImportIndex + TypeIndex,
        E: Editor,
        N: Notifier + ?Sized,
    {
        self.build_plan(host, editor, notifier)
            .inspect_err(|err| surface(notifier, err))
    }

    /// Plan, then insert every statement below the caret line.
    pub fn run<H, E, N>(&self, host: &H, editor: &mut E, notifier: &N) -> Result<RunReport, BridgeError>
    where
        H: Clipboard + ImportIndex + TypeIndex,
        E: Editor,
        N: Notifier + ?Sized,
    {
        let plan = self.plan(host, editor, notifier)?;
        let cursor = apply(&plan, editor).inspect_err(|err| surface(notifier, err))?;

        let summary = format!(
            "generated {} assignments for {}: {} copied from {}, {} to fill in",
            plan.statements.len(),
            plan.binding.target,
            plan.copied,
            plan.binding.source,
            plan.placeholders(),
        );
        notifier.info(&summary);

        Ok(RunReport { plan, cursor })
    }

    fn build_plan<H, E, N>(&self, host: &H, editor: &E, notifier: &N) -> Result<Plan, BridgeError>
    where
        H: Clipboard + ImportIndex + TypeIndex,
        E: Editor,
        N: Notifier + ?Sized,
    {
        let mut notes = Vec::new();

        //clipboard read failures degrade to empty text
        let clipboard = match host.read_text() {
            Ok(text) => text,
            Err(err) => {
                surface(notifier, &BridgeError::ClipboardAccess(err));
                String::new()
            }
        };
        let source_name = clipboard.trim();
        if source_name.is_empty() {
            return Err(MissingInput::ClipboardEmpty.into());
        }

        let imports = host.imported_qualified_names();
        let source_type = self.pick_import(&imports, source_name, &mut notes, notifier)?;

        let selection = editor.selected_text().unwrap_or_default();
        let target_name = selection.trim();
        if target_name.is_empty() {
            return Err(MissingInput::SelectionEmpty.into());
        }
        let target_type = self.pick_import(&imports, target_name, &mut notes, notifier)?;
        debug!("source type {source_type}, target type {target_type}");

        let source_handle = host
            .resolve_type(&source_type)
            .ok_or_else(|| BridgeError::TypeResolution { name: source_type.clone() })?;
        let target_handle = host
            .resolve_type(&target_type)
            .ok_or_else(|| BridgeError::TypeResolution { name: target_type.clone() })?;
        let source_fields = host.fields_of(&source_handle);
        let target_fields = host.fields_of(&target_handle);

        let buffer = editor.buffer();
        let anchor_line = editor.caret_line();
        let line_text = buffer.text_of_line(anchor_line)?;
        let target_object = derive_target_object_name(line_text)
            .ok_or(MissingInput::NoAssignmentTarget { line: anchor_line })?;
        let binding = ObjectBinding::new(derive_source_object_name(source_name), target_object);
        let anchor_indent = leading_indent(line_text).to_string();
        let anchor_line_end_offset = buffer.line_end_offset(anchor_line)?;

        let matches = match_fields(&target_fields, &source_fields);
        let copied = matches.iter().filter(|m| m.has_source_match).count();
        let statements: Vec<GeneratedStatement> = matches
            .iter()
            .map(|m| generate_with_style(m, &binding, &self.config.accessors))
            .collect();

        let mut terminate_anchor = false;
        if !statements.is_empty() {
            if let Err(err) = insertion_start(buffer, anchor_line_end_offset) {
                if !self.config.append_missing_newline || anchor_line_end_offset != buffer.len() {
                    return Err(err.into());
                }
                terminate_anchor = true;
            }
        }

        let unmatched_source = unmatched_source_fields(&target_fields, &source_fields)
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if !unmatched_source.is_empty() {
            debug!("source fields without a target: {}", unmatched_source.join(", "));
        }

        Ok(Plan {
            source_type,
            target_type,
            binding,
            statements,
            anchor_line,
            anchor_indent,
            anchor_line_end_offset,
            terminate_anchor,
            copied,
            unmatched_source,
            notes,
        })
    }

    fn pick_import<N: Notifier + ?Sized>(
        &self,
        imports: &[String],
        name: &str,
        notes: &mut Vec<String>,
        notifier: &N,
    ) -> Result<String, BridgeError> {
        let found = lookup_import(imports, name).ok_or_else(|| MissingInput::NoImportMatch {
            name: name.to_string(),
        })?;

        if found.is_ambiguous() {
            if self.config.ambiguous_imports == AmbiguityPolicy::Reject {
                return Err(MissingInput::AmbiguousImport {
                    name: name.to_string(),
                    candidates: found.candidates(),
                }
                .into());
            }
            let note = format!(
                "`{name}` matches several imports ({}), using {}",
                found.candidates().join(", "),
                found.qualified
            );
            notifier.warn(&note);
            notes.push(note);
        }
        Ok(found.qualified)
    }
}

/// Mutating half of `run`. The caller holds the editor exclusively.
fn apply<E: Editor>(plan: &Plan, editor: &mut E) -> Result<Option<usize>, BridgeError> {
    if plan.statements.is_empty() {
        return Ok(None);
    }

    let buffer = editor.buffer_mut();
    if plan.terminate_anchor {
        let end = buffer.len();
        let terminator = buffer.line_terminator();
        buffer.insert_text(end, terminator)?;
    }
    let outcome = insert_all(&plan.statements, &plan.anchor_indent, buffer, plan.anchor_line_end_offset)?;

    if let Some(cursor) = outcome.cursor {
        editor.move_caret_to(cursor)?;
    }
    editor.commit();
    Ok(outcome.cursor)
}

/// The notifier is the only sink; `LogNotifier` does the logging.
fn surface<N: Notifier + ?Sized>(notifier: &N, err: &BridgeError) {
    let message = err.to_string();
    if err.is_warning() {
        notifier.warn(&message);
    } else {
        notifier.error(&message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::insert::LineBuffer;
    use crate::mapping::host::{BufferEditor, RecordingNotifier, Severity};
    use crate::mapping::snapshot::{HostSnapshot, InMemoryHost};

    const SOURCE: &str = "import com.acme.User;\nimport com.acme.dto.UserDto;\n\nclass Mapper {\n    UserDto map(User user) {\n        UserDto dto = new UserDto();\n        return dto;\n    }\n}\n";

    fn mk_host(clipboard: Option<&str>) -> InMemoryHost {
        InMemoryHost::new(
            HostSnapshot {
                clipboard: clipboard.map(str::to_string),
                ..HostSnapshot::default()
            }
            .with_type("com.acme.User", &["name", "age", "password"])
            .with_type("com.acme.dto.UserDto", &["id", "name", "age"]),
        )
    }

    fn mk_editor(text: &str, caret_line: usize, selection: Option<&str>) -> BufferEditor {
        BufferEditor::new(LineBuffer::new(text), caret_line, selection.map(str::to_string))
    }

    #[test]
    fn end_to_end_inserts_below_caret() {
        let host = mk_host(Some("User"));
        let mut editor = mk_editor(SOURCE, 5, Some("UserDto"));
        let notifier = RecordingNotifier::new();

        let report = BridgeAction::default().run(&host, &mut editor, &notifier).unwrap();

        assert_eq!(report.plan.binding, ObjectBinding::new("user", "dto"));
        assert_eq!(report.plan.unmatched_source, vec!["password".to_string()]);
        let b = editor.buffer();
        assert_eq!(b.text_of_line(5).unwrap(), "        UserDto dto = new UserDto();");
        assert_eq!(b.text_of_line(6).unwrap(), "        dto.setId();");
        assert_eq!(b.text_of_line(7).unwrap(), "        dto.setName(user.getName());");
        assert_eq!(b.text_of_line(8).unwrap(), "        dto.setAge(user.getAge());");
        assert_eq!(b.text_of_line(9).unwrap(), "        return dto;");

        assert_eq!(report.cursor, Some(b.line_start_offset(8).unwrap()));
        assert_eq!(editor.caret_line(), 8);
        assert_eq!(editor.commits(), 1);
        assert!(notifier.of(Severity::Warn).is_empty());
        assert_eq!(notifier.of(Severity::Info).len(), 1);
    }

    #[test]
    fn empty_clipboard_stops_before_anything_else() {
        let host = mk_host(Some("   "));
        let mut editor = mk_editor(SOURCE, 5, Some("UserDto"));
        let notifier = RecordingNotifier::new();

        let err = BridgeAction::default().run(&host, &mut editor, &notifier).unwrap_err();

        assert_eq!(err, BridgeError::UserInputMissing(MissingInput::ClipboardEmpty));
        assert_eq!(editor.buffer().as_str(), SOURCE);
        assert_eq!(editor.commits(), 0);
        assert_eq!(notifier.of(Severity::Warn).len(), 1);
    }

    #[test]
    fn clipboard_failure_is_reported_then_treated_as_empty() {
        let host = mk_host(None);
        let mut editor = mk_editor(SOURCE, 5, Some("UserDto"));
        let notifier = RecordingNotifier::new();

        let err = BridgeAction::default().run(&host, &mut editor, &notifier).unwrap_err();

        assert!(matches!(err, BridgeError::UserInputMissing(MissingInput::ClipboardEmpty)));
        assert_eq!(
            notifier.messages(),
            vec![
                (Severity::Error, "Error: clipboard is unavailable".to_string()),
                (Severity::Warn, "the clipboard is empty".to_string()),
            ]
        );
    }

    #[test]
    fn clipboard_without_import_stops() {
        let host = mk_host(Some("Order"));
        let mut editor = mk_editor(SOURCE, 5, Some("UserDto"));
        let notifier = RecordingNotifier::new();

        let err = BridgeAction::default().run(&host, &mut editor, &notifier).unwrap_err();

        assert!(matches!(
            err,
            BridgeError::UserInputMissing(MissingInput::NoImportMatch { ref name }) if name == "Order"
        ));
        assert_eq!(editor.buffer().as_str(), SOURCE);
    }

    #[test]
    fn empty_selection_stops() {
        let host = mk_host(Some("User"));
        let mut editor = mk_editor(SOURCE, 5, None);
        let notifier = RecordingNotifier::new();

        let err = BridgeAction::default().run(&host, &mut editor, &notifier).unwrap_err();

        assert_eq!(err, BridgeError::UserInputMissing(MissingInput::SelectionEmpty));
        assert_eq!(editor.buffer().as_str(), SOURCE);
    }

    #[test]
    fn unresolvable_type_is_an_error() {
        let mut snapshot = HostSnapshot {
            clipboard: Some("User".to_string()),
            ..HostSnapshot::default()
        }
        .with_type("com.acme.User", &["name"]);
        snapshot.imports.push("com.acme.dto.UserDto".to_string());
        let host = InMemoryHost::new(snapshot);
        let mut editor = mk_editor(SOURCE, 5, Some("UserDto"));
        let notifier = RecordingNotifier::new();

        let err = BridgeAction::default().run(&host, &mut editor, &notifier).unwrap_err();

        assert_eq!(err, BridgeError::TypeResolution { name: "com.acme.dto.UserDto".to_string() });
        assert_eq!(notifier.of(Severity::Error).len(), 1);
        assert_eq!(editor.buffer().as_str(), SOURCE);
    }

    #[test]
    fn caret_line_without_assignment_stops() {
        let host = mk_host(Some("User"));
        let mut editor = mk_editor(SOURCE, 6, Some("UserDto"));
        let notifier = RecordingNotifier::new();

        let err = BridgeAction::default().run(&host, &mut editor, &notifier).unwrap_err();

        assert_eq!(err, BridgeError::UserInputMissing(MissingInput::NoAssignmentTarget { line: 6 }));
        assert_eq!(editor.buffer().as_str(), SOURCE);
    }

    #[test]
    fn ambiguous_import_warns_or_rejects() {
        let snapshot = HostSnapshot {
            clipboard: Some("User".to_string()),
            ..HostSnapshot::default()
        }
        .with_type("com.acme.User", &["name"])
        .with_type("com.legacy.User", &["name"])
        .with_type("com.acme.dto.UserDto", &["name"]);
        let host = InMemoryHost::new(snapshot);

        let notifier = RecordingNotifier::new();
        let mut editor = mk_editor(SOURCE, 5, Some("UserDto"));
        let report = BridgeAction::default().run(&host, &mut editor, &notifier).unwrap();
        assert_eq!(report.plan.source_type, "com.acme.User");
        assert_eq!(report.plan.notes.len(), 1);
        assert_eq!(notifier.of(Severity::Warn).len(), 1);

        let strict = BridgeAction::new(BridgeConfig {
            ambiguous_imports: AmbiguityPolicy::Reject,
            ..BridgeConfig::default()
        });
        let mut editor = mk_editor(SOURCE, 5, Some("UserDto"));
        let err = strict.run(&host, &mut editor, &RecordingNotifier::new()).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::UserInputMissing(MissingInput::AmbiguousImport { ref candidates, .. }) if candidates.len() == 2
        ));
        assert_eq!(editor.buffer().as_str(), SOURCE);
    }

    #[test]
    fn empty_target_type_leaves_buffer_unchanged() {
        let host = InMemoryHost::new(
            HostSnapshot {
                clipboard: Some("User".to_string()),
                ..HostSnapshot::default()
            }
            .with_type("com.acme.User", &["name"])
            .with_type("com.acme.dto.UserDto", &[]),
        );
        let mut editor = mk_editor(SOURCE, 5, Some("UserDto"));

        let report = BridgeAction::default()
            .run(&host, &mut editor, &RecordingNotifier::new())
            .unwrap();

        assert!(report.plan.statements.is_empty());
        assert_eq!(report.cursor, None);
        assert_eq!(editor.buffer().as_str(), SOURCE);
        assert_eq!(editor.commits(), 0);
    }

    #[test]
    fn unterminated_anchor_line_gets_a_newline_first() {
        let host = mk_host(Some("User"));
        let mut editor = mk_editor("\tUserDto dto = new UserDto();", 0, Some("UserDto"));

        BridgeAction::default()
            .run(&host, &mut editor, &RecordingNotifier::new())
            .unwrap();

        assert_eq!(
            editor.buffer().as_str(),
            "\tUserDto dto = new UserDto();\n\tdto.setId();\n\tdto.setName(user.getName());\n\tdto.setAge(user.getAge());\n"
        );
    }

    #[test]
    fn unterminated_anchor_line_fails_when_configured_strict() {
        let host = mk_host(Some("User"));
        let text = "UserDto dto = new UserDto();";
        let mut editor = mk_editor(text, 0, Some("UserDto"));
        let action = BridgeAction::new(BridgeConfig {
            append_missing_newline: false,
            ..BridgeConfig::default()
        });

        let err = action.run(&host, &mut editor, &RecordingNotifier::new()).unwrap_err();

        assert!(matches!(err, BridgeError::Buffer(_)));
        assert_eq!(editor.buffer().as_str(), text);
    }

    #[test]
    fn crlf_file_keeps_its_line_endings() {
        let text = SOURCE.replace('\n', "\r\n");
        let host = mk_host(Some("User"));
        let mut editor = mk_editor(&text, 5, Some("UserDto"));

        BridgeAction::default()
            .run(&host, &mut editor, &RecordingNotifier::new())
            .unwrap();

        let expected = text.replace(
            "        UserDto dto = new UserDto();\r\n",
            "        UserDto dto = new UserDto();\r\n        dto.setId();\r\n        dto.setName(user.getName());\r\n        dto.setAge(user.getAge());\r\n",
        );
        assert_eq!(editor.buffer().as_str(), expected);
    }

    #[test]
    fn crlf_file_untouched_when_target_has_no_fields() {
        let text = SOURCE.replace('\n', "\r\n");
        let host = InMemoryHost::new(
            HostSnapshot {
                clipboard: Some("User".to_string()),
                ..HostSnapshot::default()
            }
            .with_type("com.acme.User", &["name"])
            .with_type("com.acme.dto.UserDto", &[]),
        );
        let mut editor = mk_editor(&text, 5, Some("UserDto"));

        BridgeAction::default()
            .run(&host, &mut editor, &RecordingNotifier::new())
            .unwrap();

        assert_eq!(editor.buffer().as_str(), text);
    }

    #[test]
    fn each_stop_reaches_the_notifier_once() {
        let warned = RecordingNotifier::new();
        surface(&warned, &BridgeError::UserInputMissing(MissingInput::SelectionEmpty));
        assert_eq!(warned.messages(), vec![(Severity::Warn, "no class name is selected".to_string())]);

        let failed = RecordingNotifier::new();
        surface(&failed, &BridgeError::TypeResolution { name: "a.B".to_string() });
        assert_eq!(failed.messages(), vec![(Severity::Error, "cannot resolve fields of `a.B`".to_string())]);
    }

    #[test]
    fn plan_does_not_mutate() {
        let host = mk_host(Some("User"));
        let editor = mk_editor(SOURCE, 5, Some("UserDto"));

        let plan = BridgeAction::default().plan(&host, &editor, &RecordingNotifier::new()).unwrap();

        assert_eq!(plan.statements.len(), 3);
        assert_eq!(plan.copied, 2);
        assert_eq!(plan.placeholders(), 1);
        assert_eq!(plan.anchor_indent, "        ");
        assert_eq!(editor.buffer().as_str(), SOURCE);
    }
}
