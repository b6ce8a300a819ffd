// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Team logo description generation
//!
//! Turns a BLIP logo caption into a set of French team descriptions by
//! cleaning the caption down to its key elements and rendering a random
//! selection of templates around them.

pub mod templates;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

pub use templates::{build_pool, Template, GENERIC_TEMPLATES, TEAM_TEMPLATE_COUNT};

/// Prompt used to condition logo captions
pub const LOGO_PROMPT: &str = "logo representing";

/// Token budget for logo captions, prompt included
pub const LOGO_CAPTION_MAX_LENGTH: usize = 30;

/// Used when the cleaned caption is too short to be meaningful
pub const DEFAULT_KEY_ELEMENTS: &str = "un emblème puissant";

/// Key elements shorter than this (in characters) fall back to the default
pub const MIN_KEY_ELEMENTS_LEN: usize = 5;

/// Default number of descriptions returned by the plural endpoint
pub const DEFAULT_NUM_SUGGESTIONS: i64 = 3;

/// Requests above this many descriptions are served but logged
pub const LARGE_SUGGESTION_COUNT: usize = 1_000;

const UNKNOWN_TOKEN: &str = "[UNK]";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("num_suggestions must be a non-negative integer, got {0}")]
    InvalidCount(i64),
}

/// Check a requested description count
pub fn validate_count(count: i64) -> Result<usize, DescriptionError> {
    usize::try_from(count).map_err(|_| DescriptionError::InvalidCount(count))
}

/// Replace key elements shorter than the threshold with the default phrase
pub fn resolve_key_elements(key_elements: &str) -> String {
    let trimmed = key_elements.trim();
    if trimmed.chars().count() < MIN_KEY_ELEMENTS_LEN {
        DEFAULT_KEY_ELEMENTS.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derive key elements from a conditioned caption
///
/// Strips every occurrence of `prompt`, removes `[UNK]` markers and
/// applies the short-content fallback.
pub fn extract_key_elements(caption: &str, prompt: &str) -> String {
    let stripped = if prompt.is_empty() {
        caption.to_string()
    } else {
        caption.replace(prompt, "")
    };
    let cleaned = stripped.trim().replace(UNKNOWN_TOKEN, "");
    resolve_key_elements(&cleaned)
}

/// Renders randomized description sets from the template pool
///
/// Stateless; every call builds its own pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionEngine;

impl DescriptionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Generate `count` descriptions using the thread-local RNG
    pub fn generate(
        &self,
        key_elements: &str,
        team_name: &str,
        count: i64,
    ) -> Result<Vec<String>, DescriptionError> {
        self.generate_with_rng(&mut rand::thread_rng(), key_elements, team_name, count)
    }

    /// Generate `count` descriptions drawing randomness from `rng`
    ///
    /// The pool is shuffled and the first `min(count, pool)` entries are
    /// taken; any shortfall is filled by drawing with replacement, so
    /// descriptions repeat once `count` exceeds the pool size.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        key_elements: &str,
        team_name: &str,
        count: i64,
    ) -> Result<Vec<String>, DescriptionError> {
        let count = validate_count(count)?;
        if count > LARGE_SUGGESTION_COUNT {
            tracing::warn!(
                "Large description request: {} suggestions for team {:?}",
                count,
                team_name
            );
        }
        let key_elements = resolve_key_elements(key_elements);

        let mut pool = build_pool(team_name, &key_elements);
        pool.shuffle(rng);

        let mut selected: Vec<&Template> = pool.iter().take(count).collect();
        while selected.len() < count {
            match pool.choose(rng) {
                Some(template) => selected.push(template),
                None => break,
            }
        }

        Ok(selected
            .into_iter()
            .map(|template| template.render(&key_elements))
            .collect())
    }
}
