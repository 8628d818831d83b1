use std::path::Path;

use refclip::app::actions::{Action, ActionContext, ActionError, run_action};
use refclip::app::settings::CopySettings;
use refclip::domain::document::{Document, EditorState, Position, Selection};
use refclip::domain::errors::PermalinkError;
use refclip::domain::model::{CodeFormat, LineNumberFormat, PermalinkType};
use refclip::infra::clipboard::{ClipboardSink, MemoryClipboard};
use refclip::infra::git::ScriptedGit;
use refclip::infra::notify::{RecordingNotifier, Severity};

const ROOT: &str = "/work/project";

fn editor(text: &str, language: &str, selection: Selection) -> EditorState {
    EditorState::new(
        Document::new(format!("{ROOT}/src/sample.ts"), text, language),
        selection,
    )
}

fn github_repo() -> ScriptedGit {
    ScriptedGit::new()
        .respond(&["rev-parse", "--show-toplevel"], ROOT)
        .respond(
            &["remote", "get-url", "origin"],
            "https://github.com/acme/project.git",
        )
        .respond(
            &["rev-parse", "HEAD"],
            "9fceb02d0ae598e95dc970b74767f19372d61af8",
        )
}

fn copy(action: Action, state: &EditorState, settings: &CopySettings, git: &ScriptedGit) -> String {
    let context = ActionContext {
        editor: Some(state),
        settings,
        workspace_root: Some(Path::new(ROOT)),
        git,
    };
    let mut clipboard = MemoryClipboard::new();
    let notifier = RecordingNotifier::new();
    run_action(action, &context, &mut clipboard, &notifier).expect("copy succeeds");
    assert_eq!(clipboard.writes(), 1);
    clipboard.read().expect("read clipboard")
}

fn relative(path: &str) -> String {
    Path::new(path).display().to_string()
}

#[test]
fn cursor_line_is_referenced_in_each_notation() {
    let state = editor(
        "Line 1\nLine 2\nLine 3",
        "typescript",
        Selection::cursor(Position::new(1, 0)),
    );
    let git = ScriptedGit::new();

    for (format, suffix) in [
        (LineNumberFormat::Github, "#L2"),
        (LineNumberFormat::Editor, ":2"),
        (LineNumberFormat::Parentheses, "(2)"),
    ] {
        let settings = CopySettings {
            line_number_format: format,
            ..CopySettings::default()
        };
        let copied = copy(Action::CopyPath, &state, &settings, &git);
        assert_eq!(copied, format!("{}{suffix}", relative("src/sample.ts")));
    }
}

#[test]
fn multi_line_selection_copies_range() {
    let state = editor(
        "Line 1\nLine 2\nLine 3\nLine 4",
        "typescript",
        Selection::new(Position::new(1, 0), Position::new(2, 6)),
    );
    let copied = copy(
        Action::CopyPath,
        &state,
        &CopySettings::default(),
        &ScriptedGit::new(),
    );
    assert!(copied.ends_with("#L2-3"), "{copied}");
}

#[test]
fn copy_with_code_appends_selected_text() {
    let state = editor(
        "const hello = \"world\";",
        "typescript",
        Selection::new(Position::new(0, 0), Position::new(0, 22)),
    );
    let copied = copy(
        Action::CopyPathWithCode,
        &state,
        &CopySettings::default(),
        &ScriptedGit::new(),
    );
    assert_eq!(
        copied,
        format!("{}#L1\n\nconst hello = \"world\";", relative("src/sample.ts"))
    );
}

#[test]
fn markdown_code_is_fenced_with_language() {
    let state = editor(
        "const test = 123;",
        "typescript",
        Selection::new(Position::new(0, 0), Position::new(0, 17)),
    );
    let settings = CopySettings {
        code_format: CodeFormat::Markdown,
        ..CopySettings::default()
    };
    let copied = copy(Action::CopyPathWithCode, &state, &settings, &ScriptedGit::new());
    assert!(copied.contains("```typescript\nconst test = 123;\n```"), "{copied}");
}

#[test]
fn repeated_copies_are_identical() {
    let state = editor(
        "alpha\nbeta\ngamma",
        "plaintext",
        Selection::new(Position::new(0, 2), Position::new(2, 1)),
    );
    let settings = CopySettings::default();
    let git = github_repo();

    for action in [Action::CopyPathWithCode, Action::CopyPermalinkWithCode] {
        let first = copy(action, &state, &settings, &git);
        let second = copy(action, &state, &settings, &git);
        assert_eq!(first, second);
    }
}

#[test]
fn permalink_points_at_commit() {
    let state = editor(
        "a\nb\nc\nd",
        "typescript",
        Selection::new(Position::new(1, 0), Position::new(3, 1)),
    );
    let copied = copy(
        Action::CopyPermalink,
        &state,
        &CopySettings::default(),
        &github_repo(),
    );
    assert_eq!(
        copied,
        "https://github.com/acme/project/blob/9fceb02d0ae598e95dc970b74767f19372d61af8/src/sample.ts#L2-L4"
    );
}

#[test]
fn permalink_with_code_on_default_branch() {
    let state = editor(
        "fn a() {}\nfn b() {}",
        "rust",
        Selection::cursor(Position::new(1, 3)),
    );
    let git = github_repo().respond(
        &["rev-parse", "--verify", "--quiet", "refs/heads/main"],
        "1111111",
    );
    let settings = CopySettings {
        permalink_type: PermalinkType::Branch,
        include_blank_line: false,
        code_format: CodeFormat::Markdown,
        ..CopySettings::default()
    };
    let copied = copy(Action::CopyPermalinkWithCode, &state, &settings, &git);
    assert_eq!(
        copied,
        "https://github.com/acme/project/blob/main/src/sample.ts#L2\n```rust\nfn b() {}\n```"
    );
}

#[test]
fn commit_permalink_without_head_reports_one_error() {
    let state = editor("x", "plaintext", Selection::cursor(Position::new(0, 0)));
    let git = ScriptedGit::new()
        .respond(&["rev-parse", "--show-toplevel"], ROOT)
        .respond(&["remote", "get-url", "origin"], "git@github.com:acme/project.git");
    let settings = CopySettings {
        permalink_type: PermalinkType::Commit,
        ..CopySettings::default()
    };
    let context = ActionContext {
        editor: Some(&state),
        settings: &settings,
        workspace_root: Some(Path::new(ROOT)),
        git: &git,
    };
    let mut clipboard = MemoryClipboard::new();
    let notifier = RecordingNotifier::new();

    let result = run_action(Action::CopyPermalinkWithCode, &context, &mut clipboard, &notifier);
    assert!(matches!(
        result,
        Err(ActionError::Permalink(PermalinkError::NoCommit))
    ));
    assert_eq!(clipboard.writes(), 0);
    assert_eq!(notifier.notifications().len(), 1);
    assert_eq!(
        notifier.messages(Severity::Error),
        vec!["Could not determine the current commit".to_string()]
    );
}

#[test]
fn unsupported_remote_reports_one_error() {
    let state = editor("x", "plaintext", Selection::cursor(Position::new(0, 0)));
    let git = ScriptedGit::new()
        .respond(&["rev-parse", "--show-toplevel"], ROOT)
        .respond(&["remote", "get-url", "origin"], "git@gitlab.com:acme/project.git");
    let settings = CopySettings::default();
    let context = ActionContext {
        editor: Some(&state),
        settings: &settings,
        workspace_root: Some(Path::new(ROOT)),
        git: &git,
    };
    let mut clipboard = MemoryClipboard::new();
    let notifier = RecordingNotifier::new();

    let result = run_action(Action::CopyPermalink, &context, &mut clipboard, &notifier);
    assert!(matches!(
        result,
        Err(ActionError::Permalink(PermalinkError::UnsupportedRemote(_)))
    ));
    assert_eq!(clipboard.writes(), 0);
    assert_eq!(notifier.notifications().len(), 1);
    assert_eq!(notifier.messages(Severity::Error).len(), 1);
}
