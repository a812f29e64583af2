//! Built-in scenes, looked up by name.

mod attention_basics;
mod attention_score;
mod cnn_explainer;
mod query_key_value;
mod simple_transformer;
mod transformer_architecture;
mod transformer_intuition;
mod yellow_circle;

use kinegram_core::{KinegramError, KinegramResult};
use kinegram_ir::{Scene, SceneContext};

/// Builds a scene against a context.
pub type SceneFn = fn(&SceneContext) -> KinegramResult<Scene>;

/// A catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct SceneInfo {
    pub name: &'static str,
    pub description: &'static str,
    build: SceneFn,
}

impl SceneInfo {
    pub fn build(&self, ctx: &SceneContext) -> KinegramResult<Scene> {
        tracing::debug!(scene = self.name, seed = ctx.seed, "building catalog scene");
        (self.build)(ctx)
    }
}

const SCENES: &[SceneInfo] = &[
    SceneInfo {
        name: yellow_circle::NAME,
        description: "Filled circle drawn under a title, pulsed up and back",
        build: yellow_circle::build,
    },
    SceneInfo {
        name: simple_transformer::NAME,
        description: "Encoder and decoder boxes joined by an arrow, with pulsing attention circles",
        build: simple_transformer::build,
    },
    SceneInfo {
        name: cnn_explainer::NAME,
        description: "Convolution, pooling and a dense layer classifying an input grid",
        build: cnn_explainer::build,
    },
    SceneInfo {
        name: attention_basics::NAME,
        description: "Self-attention over a sentence and its seeded attention matrix",
        build: attention_basics::build,
    },
    SceneInfo {
        name: transformer_architecture::NAME,
        description: "Tokens, embeddings, multi-head attention and the encoder-decoder stack",
        build: transformer_architecture::build,
    },
    SceneInfo {
        name: transformer_intuition::NAME,
        description: "From words-in, words-out to the full block, told through one sentence",
        build: transformer_intuition::build,
    },
    SceneInfo {
        name: query_key_value::NAME,
        description: "A seeded embedding projected into query, key and value vectors",
        build: query_key_value::build,
    },
    SceneInfo {
        name: attention_score::NAME,
        description: "One query-key dot product worked out term by term",
        build: attention_score::build,
    },
];

/// The registry of built-in scenes, in presentation order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneCatalog;

impl SceneCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn entries(&self) -> &'static [SceneInfo] {
        SCENES
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        SCENES.iter().map(|s| s.name)
    }

    pub fn get(&self, name: &str) -> KinegramResult<&'static SceneInfo> {
        SCENES
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| KinegramError::UnknownScene(name.to_string()))
    }

    /// Look up `name` and build it.
    pub fn build(&self, name: &str, ctx: &SceneContext) -> KinegramResult<Scene> {
        self.get(name)?.build(ctx)
    }
}
