use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::config::ConfigError;

const INVALID_FILE_EXT_CHARS: [char; 2] = ['/', '.'];

/// Configuration for a supported language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    /// Registry key (e.g., "python"). Filled in from the table name.
    #[serde(skip)]
    pub key: String,

    /// Human-readable name for the language (e.g., "C++")
    pub name: String,

    /// Icon shown next to the name in a language picker
    #[serde(default)]
    pub icon: String,

    /// File extension
    pub extension: FileExtension,

    /// How the language is handled
    pub kind: LanguageKind,

    /// Starter source shown before the user edits anything
    #[serde(default)]
    pub template: String,

    /// Patterns indicating the code reads interactive input
    #[serde(default)]
    pub input_patterns: InputPatterns,
}

impl Language {
    /// Whether the run is simulated by the completion model.
    ///
    /// Markup and stylesheet languages are previewed by the client instead.
    pub fn supports_simulated_execution(&self) -> bool {
        self.kind.is_simulated()
    }

    /// Check whether any input pattern matches the given source
    pub fn reads_input(&self, code: &str) -> bool {
        self.input_patterns.matches(code)
    }
}

/// Broad category of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKind {
    Interpreted,
    Compiled,
    Markup,
    Stylesheet,
}

impl LanguageKind {
    pub fn is_simulated(self) -> bool {
        matches!(self, LanguageKind::Interpreted | LanguageKind::Compiled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageKind::Interpreted => "interpreted",
            LanguageKind::Compiled => "compiled",
            LanguageKind::Markup => "markup",
            LanguageKind::Stylesheet => "stylesheet",
        }
    }
}

impl std::fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File extension without dot (e.g., "cpp")
#[derive(Debug, Clone, Serialize)]
pub struct FileExtension(String);

impl FileExtension {
    pub fn new(extension: &str) -> Result<Self, ConfigError> {
        let contains_invalid = extension
            .chars()
            .any(|c| INVALID_FILE_EXT_CHARS.contains(&c));
        if contains_invalid {
            return Err(ConfigError::InvalidFileExtChars);
        }
        Ok(Self(extension.to_owned()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for FileExtension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FileExtension::new(&s).map_err(|_| {
            de::Error::invalid_value(
                de::Unexpected::Str(&s),
                &"a file extension without '/' or '.' characters",
            )
        })
    }
}

impl std::fmt::Display for FileExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, case-insensitive input-detection patterns
///
/// Patterns are compiled once when the configuration is loaded.
#[derive(Debug, Clone, Default)]
pub struct InputPatterns(Vec<Regex>);

impl InputPatterns {
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ConfigError::InvalidPattern {
                        pattern: pattern.to_owned(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// True on the first pattern that matches
    pub fn matches(&self, code: &str) -> bool {
        self.0.iter().any(|pattern| pattern.is_match(code))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Source text of each pattern, in declaration order
    pub fn as_strs(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Regex::as_str)
    }
}

impl<'de> Deserialize<'de> for InputPatterns {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        InputPatterns::new(&raw).map_err(de::Error::custom)
    }
}

impl Serialize for InputPatterns {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.as_strs())
    }
}
