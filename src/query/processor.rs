//! Query processing API
//!
//! Runs a query through the pipeline up to a chosen stage and formats what
//! comes out. Formats are named `<stage>-<format>`, plus plain `english`:
//!
//! | format        | output                                   |
//! |---------------|------------------------------------------|
//! | `english`     | the English rendering                    |
//! | `token-simple`| one `<kind:text>` tag per token          |
//! | `token-json`  | the token list as JSON                   |
//! | `ast-tag`     | XML-like dump of the tree                |
//! | `ast-treeviz` | tree outline                             |
//! | `ast-json`    | the tree as JSON                         |
//!
//! The `ast-*` dumps grow with the square of the nesting depth, so they are
//! refused for trees deeper than [`MAX_AST_DEPTH`]. `english` has no limit.

use thiserror::Error;

use crate::query::lexer::Token;
use crate::query::parser::{serialize_ast_tag, to_treeviz_str};
use crate::query::Translator;

/// Deepest tree the `ast-*` formats will dump, the same as serde_json's
/// recursion limit when reading JSON back
pub const MAX_AST_DEPTH: usize = 128;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
    English,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Tag,
    Treeviz,
    Text,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("query nests {depth} levels deep; tree output stops at {limit}")]
    TooDeep { depth: usize, limit: usize },
}

impl Default for ProcessingSpec {
    fn default() -> Self {
        ProcessingSpec {
            stage: ProcessingStage::English,
            format: OutputFormat::Text,
        }
    }
}

impl ProcessingSpec {
    /// Parse a format string like "english", "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        if format_str == "english" {
            return Ok(ProcessingSpec::default());
        }

        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "tag" => OutputFormat::Tag,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        // Validate stage/format compatibility
        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Simple | OutputFormat::Json) => {}
            (ProcessingStage::Ast, OutputFormat::Tag | OutputFormat::Treeviz | OutputFormat::Json) => {}
            _ => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "'{}' is not available for the {} stage",
                    format.as_str(),
                    stage.as_str()
                )))
            }
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            ProcessingSpec::default(),
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Tag,
            },
            ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Treeviz,
            },
            ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Json,
            },
        ]
    }

    /// The format string this spec parses from
    pub fn name(&self) -> String {
        match self.stage {
            ProcessingStage::English => "english".to_string(),
            stage => format!("{}-{}", stage.as_str(), self.format.as_str()),
        }
    }
}

impl ProcessingStage {
    fn as_str(&self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
            ProcessingStage::English => "english",
        }
    }
}

impl OutputFormat {
    fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Tag => "tag",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Text => "text",
        }
    }
}

/// Process one query according to the given specification
pub fn process_query(
    query: &str,
    spec: &ProcessingSpec,
    translator: &Translator,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::English => Ok(translator.display(query)),
        ProcessingStage::Token => format_tokens(&translator.tokenize(query), spec.format),
        ProcessingStage::Ast => {
            let ast = translator.parse(query);
            let depth = ast.depth();
            if depth > MAX_AST_DEPTH {
                return Err(ProcessingError::TooDeep {
                    depth,
                    limit: MAX_AST_DEPTH,
                });
            }
            match spec.format {
                OutputFormat::Tag => Ok(serialize_ast_tag(&ast)),
                OutputFormat::Treeviz => Ok(to_treeviz_str(&ast)),
                OutputFormat::Json => serde_json::to_string_pretty(&ast)
                    .map_err(|e| ProcessingError::Serialization(e.to_string())),
                other => Err(ProcessingError::InvalidFormatType(other.as_str().to_string())),
            }
        }
    }
}

/// Format tokens according to the specified format
fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => Ok(tokens.iter().map(|token| token.to_string()).collect()),
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        other => Err(ProcessingError::InvalidFormatType(format!(
            "'{}' is not available for the token stage",
            other.as_str()
        ))),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}
