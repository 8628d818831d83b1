//! Editor-style language identifiers for fenced code blocks.

use std::path::Path;

use once_cell::sync::Lazy;
use syntect::parsing::SyntaxSet;

pub const PLAIN_TEXT: &str = "plaintext";

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Extensions whose ids differ from syntect's syntax names, or that syntect does not ship.
static EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("ts", "typescript"),
    ("mts", "typescript"),
    ("cts", "typescript"),
    ("tsx", "typescriptreact"),
    ("js", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("jsx", "javascriptreact"),
    ("rs", "rust"),
    ("py", "python"),
    ("go", "go"),
    ("java", "java"),
    ("kt", "kotlin"),
    ("c", "c"),
    ("h", "c"),
    ("cc", "cpp"),
    ("cpp", "cpp"),
    ("hpp", "cpp"),
    ("cs", "csharp"),
    ("rb", "ruby"),
    ("php", "php"),
    ("swift", "swift"),
    ("sh", "shellscript"),
    ("bash", "shellscript"),
    ("zsh", "shellscript"),
    ("md", "markdown"),
    ("json", "json"),
    ("toml", "toml"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("html", "html"),
    ("css", "css"),
    ("scss", "scss"),
    ("sql", "sql"),
    ("lua", "lua"),
    ("txt", PLAIN_TEXT),
];

/// Language id for `path`: known extensions first, then syntect's syntax name.
pub fn language_id_for(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    if let Some(extension) = extension.as_deref()
        && let Some((_, id)) = EXTENSION_LANGUAGES
            .iter()
            .find(|(known, _)| *known == extension)
    {
        return (*id).to_string();
    }

    match SYNTAX_SET.find_syntax_for_file(path) {
        Ok(Some(syntax)) if syntax.name != "Plain Text" => syntax_id(&syntax.name),
        Ok(_) => PLAIN_TEXT.to_string(),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "syntax lookup failed");
            PLAIN_TEXT.to_string()
        }
    }
}

fn syntax_id(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase()
}
