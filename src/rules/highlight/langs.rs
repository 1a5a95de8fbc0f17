//! Language table for the highlight rule
//!
//! Each entry carries just enough lexical surface for the single-pass
//! scanner: keyword and builtin-type word lists, the line comment prefix,
//! and the string delimiter set. Lookup goes through an alias map so the
//! usual short tags (`js`, `py`, `sh`) resolve too.

pub struct Language {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub types: &'static [&'static str],
    pub line_comment: &'static str,
    pub string_delims: &'static [char],
}

const RUST: Language = Language {
    name: "rust",
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "self", "static", "struct", "trait", "type", "unsafe", "use",
        "where", "while",
    ],
    types: &[
        "bool", "char", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "str", "u8",
        "u16", "u32", "u64", "u128", "usize", "String", "Vec", "Option", "Result", "Box",
    ],
    line_comment: "//",
    string_delims: &['"'],
};

const PYTHON: Language = Language {
    name: "python",
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "None", "nonlocal", "not", "or", "pass", "raise", "return", "True", "False",
        "try", "while", "with", "yield",
    ],
    types: &["bool", "bytes", "dict", "float", "int", "list", "set", "str", "tuple"],
    line_comment: "#",
    string_delims: &['"', '\''],
};

const JAVASCRIPT: Language = Language {
    name: "javascript",
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
        "delete", "do", "else", "export", "extends", "finally", "for", "function", "if", "import",
        "in", "instanceof", "let", "new", "of", "return", "static", "super", "switch", "this",
        "throw", "try", "typeof", "var", "void", "while", "yield", "null", "undefined", "true",
        "false",
    ],
    types: &["Array", "Boolean", "Map", "Number", "Object", "Promise", "Set", "String"],
    line_comment: "//",
    string_delims: &['"', '\'', '`'],
};

const TYPESCRIPT: Language = Language {
    name: "typescript",
    keywords: JAVASCRIPT.keywords,
    types: &[
        "any", "boolean", "never", "number", "string", "unknown", "void", "Array", "Map",
        "Promise", "Record", "Set",
    ],
    line_comment: "//",
    string_delims: &['"', '\'', '`'],
};

const GO: Language = Language {
    name: "go",
    keywords: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var", "nil", "true", "false",
    ],
    types: &[
        "bool", "byte", "error", "float32", "float64", "int", "int8", "int16", "int32", "int64",
        "rune", "string", "uint", "uint8", "uint16", "uint32", "uint64",
    ],
    line_comment: "//",
    string_delims: &['"', '`'],
};

const C: Language = Language {
    name: "c",
    keywords: &[
        "break", "case", "const", "continue", "default", "do", "else", "enum", "extern", "for",
        "goto", "if", "inline", "return", "sizeof", "static", "struct", "switch", "typedef",
        "union", "while",
    ],
    types: &["char", "double", "float", "int", "long", "short", "signed", "unsigned", "void"],
    line_comment: "//",
    string_delims: &['"', '\''],
};

const JAVA: Language = Language {
    name: "java",
    keywords: &[
        "abstract", "break", "case", "catch", "class", "continue", "default", "do", "else",
        "enum", "extends", "final", "finally", "for", "if", "implements", "import", "instanceof",
        "interface", "new", "package", "private", "protected", "public", "return", "static",
        "super", "switch", "synchronized", "this", "throw", "throws", "try", "while", "null",
        "true", "false",
    ],
    types: &[
        "boolean", "byte", "char", "double", "float", "int", "long", "short", "void", "Integer",
        "List", "Map", "Object", "String",
    ],
    line_comment: "//",
    string_delims: &['"'],
};

const SHELL: Language = Language {
    name: "bash",
    keywords: &[
        "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if",
        "in", "local", "return", "then", "until", "while",
    ],
    types: &[],
    line_comment: "#",
    string_delims: &['"', '\''],
};

const SQL: Language = Language {
    name: "sql",
    keywords: &[
        "AND", "AS", "BY", "CREATE", "DELETE", "DROP", "FROM", "GROUP", "HAVING", "INDEX",
        "INSERT", "INTO", "JOIN", "LEFT", "LIMIT", "NOT", "NULL", "ON", "OR", "ORDER", "RIGHT",
        "SELECT", "SET", "TABLE", "UPDATE", "VALUES", "WHERE", "and", "as", "by", "create",
        "delete", "drop", "from", "group", "having", "insert", "into", "join", "left", "limit",
        "not", "null", "on", "or", "order", "select", "set", "table", "update", "values", "where",
    ],
    types: &[
        "BIGINT", "BOOLEAN", "INTEGER", "TEXT", "VARCHAR", "bigint", "boolean", "integer",
        "text", "varchar",
    ],
    line_comment: "--",
    string_delims: &['\''],
};

const JSON: Language = Language {
    name: "json",
    keywords: &["true", "false", "null"],
    types: &[],
    line_comment: "",
    string_delims: &['"'],
};

const TOML: Language = Language {
    name: "toml",
    keywords: &["true", "false"],
    types: &[],
    line_comment: "#",
    string_delims: &['"', '\''],
};

const YAML: Language = Language {
    name: "yaml",
    keywords: &["true", "false", "null", "yes", "no"],
    types: &[],
    line_comment: "#",
    string_delims: &['"', '\''],
};

/// Resolve an info-string language tag, including common aliases
pub fn lookup(tag: &str) -> Option<&'static Language> {
    match tag {
        "rust" | "rs" => Some(&RUST),
        "python" | "py" | "python3" => Some(&PYTHON),
        "javascript" | "js" | "jsx" => Some(&JAVASCRIPT),
        "typescript" | "ts" | "tsx" => Some(&TYPESCRIPT),
        "go" | "golang" => Some(&GO),
        "c" | "cpp" | "c++" | "h" => Some(&C),
        "java" => Some(&JAVA),
        "bash" | "sh" | "shell" | "zsh" => Some(&SHELL),
        "sql" => Some(&SQL),
        "json" => Some(&JSON),
        "toml" => Some(&TOML),
        "yaml" | "yml" => Some(&YAML),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(lookup("rs").map(|l| l.name), Some("rust"));
        assert_eq!(lookup("py").map(|l| l.name), Some("python"));
        assert_eq!(lookup("ts").map(|l| l.name), Some("typescript"));
    }

    #[test]
    fn test_unknown_tag() {
        assert!(lookup("brainfuck").is_none());
        assert!(lookup("").is_none());
    }
}
