//! Resumable lexer state
//!
//! The state is a stack of rule-table identifiers. An empty stack is Root.
//! Hosts cache one state per line boundary and compare them for equality to
//! decide how far a re-highlight must propagate.
use crate::config::compile_time::lexical::MAX_STATE_DEPTH;
use crate::logging::codes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateId {
    Root,
    EndpointDefinition,
    PossibleWrapClamp,
    WrapClampKeyword,
    Qualified,
    Comment,
    String,
}

impl StateId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::EndpointDefinition => "endpoint",
            Self::PossibleWrapClamp => "possible_wrap_clamp",
            Self::WrapClampKeyword => "wrap_clamp_keyword",
            Self::Qualified => "qualified",
            Self::Comment => "comment",
            Self::String => "string",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let id = match name {
            "root" => Self::Root,
            "endpoint" => Self::EndpointDefinition,
            "possible_wrap_clamp" => Self::PossibleWrapClamp,
            "wrap_clamp_keyword" => Self::WrapClampKeyword,
            "qualified" => Self::Qualified,
            "comment" => Self::Comment,
            "string" => Self::String,
            _ => return None,
        };
        Some(id)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors decoding a state from its compact string form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateParseError {
    #[error("Unknown lexer state '{name}'")]
    UnknownState { name: String },

    #[error("'root' may only appear as the bottom frame")]
    MisplacedRoot,

    #[error("State stack too deep: {depth} frames (max {max})")]
    TooDeep { depth: usize, max: usize },
}

impl StateParseError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::lexical::INVALID_STATE_ENCODING
    }
}

/// Stack of active rule tables, bottom first. Root is never stored.
/// Serializes as its compact string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LexState {
    stack: Vec<StateId>,
}

impl LexState {
    /// The state every document starts in
    pub fn root() -> Self {
        Self::default()
    }

    /// The active rule table
    pub fn current(&self) -> StateId {
        self.stack.last().copied().unwrap_or(StateId::Root)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_root(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn frames(&self) -> &[StateId] {
        &self.stack
    }

    /// Push a frame. Returns false, leaving the state unchanged, when the
    /// stack is already at its depth limit. Pushing Root is a no-op.
    pub fn push(&mut self, id: StateId) -> bool {
        if id == StateId::Root {
            return true;
        }
        if self.stack.len() >= MAX_STATE_DEPTH {
            return false;
        }
        self.stack.push(id);
        true
    }

    /// Pop the top frame. Popping Root leaves Root.
    pub fn pop(&mut self) {
        self.stack.pop();
    }
}

impl fmt::Display for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stack.is_empty() {
            return write!(f, "{}", StateId::Root);
        }
        let names: Vec<&str> = self.stack.iter().map(|id| id.as_str()).collect();
        write!(f, "{}", names.join("/"))
    }
}

impl FromStr for LexState {
    type Err = StateParseError;

    /// Parses `root`, `qualified`, `endpoint/comment`, ... An optional
    /// leading `root/` is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::root());
        }

        let mut stack = Vec::new();
        for (index, name) in s.split('/').enumerate() {
            let id = StateId::from_name(name).ok_or_else(|| StateParseError::UnknownState {
                name: name.to_string(),
            })?;
            match id {
                StateId::Root if index == 0 => {}
                StateId::Root => return Err(StateParseError::MisplacedRoot),
                other => stack.push(other),
            }
        }

        if stack.len() > MAX_STATE_DEPTH {
            return Err(StateParseError::TooDeep {
                depth: stack.len(),
                max: MAX_STATE_DEPTH,
            });
        }

        Ok(Self { stack })
    }
}

impl TryFrom<String> for LexState {
    type Error = StateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LexState> for String {
    fn from(state: LexState) -> Self {
        state.to_string()
    }
}
