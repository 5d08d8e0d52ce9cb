//! Test doubles for the model and headline seams.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::headlines::HeadlineSource;
use crate::llm_client::{CompletionModel, LlmError};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Replays scripted responses in order and records every prompt it receives.
/// Once the script runs out, every further call fails.
pub struct ScriptedModel {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(
        &self,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            temperature,
            max_tokens,
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Headline source returning a fixed list and counting calls.
#[derive(Default)]
pub struct FixedHeadlines {
    headlines: Vec<String>,
    calls: Mutex<usize>,
}

impl FixedHeadlines {
    pub fn new(headlines: Vec<String>) -> Self {
        Self {
            headlines,
            calls: Mutex::new(0),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl HeadlineSource for FixedHeadlines {
    async fn fetch_headlines(&self, max_items: usize) -> Vec<String> {
        *self.calls.lock().unwrap() += 1;
        self.headlines.iter().take(max_items).cloned().collect()
    }
}
