//! Curated lifecycle catalog for hosted generative AI models
//!
//! Providers publish no machine-readable deprecation feed, so these tables
//! are maintained by hand from the providers' deprecation pages:
//!
//! - OpenAI: <https://platform.openai.com/docs/deprecations>
//! - Anthropic: <https://docs.anthropic.com/en/docs/resources/model-deprecations>
//! - Google: <https://ai.google.dev/gemini-api/docs/deprecations>
//! - Mistral: <https://docs.mistral.ai>
//! - Cohere: <https://docs.cohere.com>
//!
//! Meta's Llama weights are open and never expire; their rows only record
//! which variants are recommended.

use eolcheck_core::{AiModelCycle, DateOrFlag};

/// `(cycle, release date, eol date, lts)`
type Row = (&'static str, &'static str, Option<&'static str>, bool);
type ModelTable = &'static [(&'static str, &'static [Row])];

const OPENAI: ModelTable = &[
    ("gpt-5.1", &[("latest", "2025-11-18", None, true)]),
    ("gpt-5-mini", &[("latest", "2025-11-18", None, true)]),
    ("gpt-5-nano", &[("latest", "2025-11-18", None, true)]),
    ("gpt-5-pro", &[("latest", "2025-11-18", None, true)]),
    ("gpt-5", &[("latest", "2025-08-07", None, true)]),
    ("gpt-4.1", &[("latest", "2025-04-14", None, true)]),
    (
        "gpt-4",
        &[
            ("0314", "2023-03-14", Some("2026-03-26"), false),
            ("0613", "2023-06-13", Some("2024-06-13"), false),
            ("1106-preview", "2023-11-06", Some("2026-03-26"), false),
            ("0125-preview", "2024-01-25", Some("2026-03-26"), false),
            ("turbo-2024-04-09", "2024-04-09", Some("2025-11-14"), false),
            ("turbo", "2024-04-09", None, true),
        ],
    ),
    (
        "gpt-4-32k",
        &[
            ("0314", "2023-03-14", Some("2025-06-06"), false),
            ("0613", "2023-06-13", Some("2025-06-06"), false),
        ],
    ),
    (
        "gpt-4o",
        &[
            ("2024-05-13", "2024-05-13", None, true),
            ("2024-08-06", "2024-08-06", None, true),
            ("latest", "2024-11-20", None, true),
        ],
    ),
    (
        "chatgpt-4o-latest",
        &[("latest", "2024-08-06", Some("2026-02-17"), false)],
    ),
    (
        "gpt-4o-mini",
        &[
            ("2024-07-18", "2024-07-18", None, true),
            ("latest", "2024-07-18", None, true),
        ],
    ),
    (
        "gpt-4.5-preview",
        &[("preview", "2025-02-27", Some("2025-07-14"), false)],
    ),
    (
        "o1",
        &[
            ("preview", "2024-09-12", Some("2025-07-28"), false),
            ("2024-12-17", "2024-12-17", None, true),
            ("latest", "2024-12-17", None, true),
        ],
    ),
    (
        "o1-mini",
        &[
            ("2024-09-12", "2024-09-12", Some("2025-10-27"), false),
            ("latest", "2024-09-12", None, true),
        ],
    ),
    (
        "o3-mini",
        &[
            ("2025-01-31", "2025-01-31", None, true),
            ("latest", "2025-01-31", None, true),
        ],
    ),
    (
        "gpt-4o-realtime-preview",
        &[
            ("2024-10-01", "2024-10-01", Some("2025-10-10"), false),
            ("2024-12-17", "2024-12-17", Some("2026-02-27"), false),
            ("2025-06-03", "2025-06-03", Some("2026-02-27"), false),
            ("latest", "2024-10-01", Some("2026-02-27"), false),
        ],
    ),
    (
        "gpt-4o-audio-preview",
        &[("2024-10-01", "2024-10-01", Some("2025-10-10"), false)],
    ),
    (
        "gpt-3.5-turbo",
        &[
            ("0301", "2023-03-01", Some("2024-09-13"), false),
            ("0613", "2023-06-13", Some("2024-09-13"), false),
            ("16k-0613", "2023-06-13", Some("2024-09-13"), false),
            ("1106", "2023-11-06", Some("2026-09-28"), false),
            ("0125", "2024-01-25", Some("2025-11-14"), false),
            ("latest", "2024-01-25", None, true),
        ],
    ),
    (
        "gpt-3.5-turbo-instruct",
        &[("latest", "2023-09-14", Some("2026-09-28"), false)],
    ),
    ("dall-e-2", &[("latest", "2022-04-06", Some("2026-05-12"), false)]),
    ("dall-e-3", &[("latest", "2023-11-06", Some("2026-05-12"), false)]),
    (
        "codex-mini-latest",
        &[("latest", "2023-03-20", Some("2026-01-16"), false)],
    ),
    ("babbage-002", &[("latest", "2023-08-22", Some("2026-09-28"), false)]),
    ("davinci-002", &[("latest", "2023-08-22", Some("2026-09-28"), false)]),
    (
        "text-moderation",
        &[
            ("007", "2023-09-26", Some("2025-10-27"), false),
            ("stable", "2023-09-26", Some("2025-10-27"), false),
            ("latest", "2023-09-26", Some("2025-10-27"), false),
        ],
    ),
];

const ANTHROPIC: ModelTable = &[
    (
        "claude-1",
        &[
            ("1.0", "2023-03-14", Some("2024-03-01"), false),
            ("1.3", "2023-05-01", Some("2024-03-01"), false),
            ("instant-1.2", "2023-05-01", Some("2024-03-01"), false),
        ],
    ),
    (
        "claude-2",
        &[
            ("2.0", "2023-07-11", Some("2025-07-21"), false),
            ("2.1", "2023-11-21", Some("2025-07-21"), false),
        ],
    ),
    (
        "claude-3-opus",
        &[
            ("20240229", "2024-02-29", Some("2026-01-01"), true),
            ("latest", "2024-02-29", None, true),
        ],
    ),
    (
        "claude-3-sonnet",
        &[("20240229", "2024-02-29", Some("2025-07-21"), false)],
    ),
    (
        "claude-3-haiku",
        &[
            ("20240307", "2024-03-07", None, true),
            ("latest", "2024-03-07", None, true),
        ],
    ),
    (
        "claude-3.5-sonnet",
        &[
            ("20240620", "2024-06-20", Some("2025-10-22"), false),
            ("20241022", "2024-10-22", Some("2025-10-22"), false),
        ],
    ),
    (
        "claude-3.5-haiku",
        &[
            ("20241022", "2024-10-22", None, true),
            ("latest", "2024-10-22", None, true),
        ],
    ),
    (
        "claude-sonnet-4",
        &[
            ("20250514", "2025-05-14", None, true),
            ("latest", "2025-05-14", None, true),
        ],
    ),
    (
        "claude-opus-4",
        &[
            ("20250514", "2025-05-14", None, true),
            ("latest", "2025-05-14", None, true),
        ],
    ),
    (
        "claude-sonnet-4.5",
        &[
            ("20250929", "2025-09-29", None, true),
            ("latest", "2025-09-29", None, true),
        ],
    ),
    (
        "claude-opus-4.1",
        &[
            ("20250805", "2025-08-05", None, true),
            ("latest", "2025-08-05", None, true),
        ],
    ),
];

const GOOGLE: ModelTable = &[
    (
        "palm-2",
        &[
            ("text-bison-001", "2023-05-10", Some("2024-10-01"), false),
            ("text-bison-002", "2023-08-01", Some("2024-10-01"), false),
            ("chat-bison-001", "2023-05-10", Some("2024-10-01"), false),
        ],
    ),
    ("gemini-pro", &[("1.0", "2023-12-06", Some("2025-02-15"), false)]),
    (
        "gemini-1.0-pro",
        &[
            ("001", "2024-02-15", Some("2025-02-15"), false),
            ("002", "2024-04-01", Some("2025-02-15"), false),
        ],
    ),
    (
        "gemini-1.5-pro",
        &[
            ("preview-0514", "2024-05-14", Some("2025-05-24"), false),
            ("001", "2024-05-24", None, true),
            ("002", "2024-09-24", None, true),
            ("latest", "2024-09-24", None, true),
        ],
    ),
    (
        "gemini-1.5-flash",
        &[
            ("preview-0514", "2024-05-14", Some("2025-05-24"), false),
            ("001", "2024-05-24", None, true),
            ("002", "2024-09-24", None, true),
            ("8b", "2024-10-03", None, true),
            ("latest", "2024-09-24", None, true),
        ],
    ),
    (
        "gemini-2.0-flash",
        &[
            ("exp", "2024-12-11", Some("2025-09-01"), false),
            ("thinking-exp", "2025-01-21", Some("2025-10-01"), false),
            ("001", "2025-02-05", None, true),
        ],
    ),
    (
        "gemini-2.5-pro",
        &[
            ("preview-0325", "2025-03-25", Some("2025-10-01"), false),
            ("latest", "2025-03-25", None, true),
        ],
    ),
    (
        "gemini-2.5-flash",
        &[
            ("preview-0520", "2025-05-20", Some("2025-12-01"), false),
            ("latest", "2025-05-20", None, true),
        ],
    ),
    (
        "gemini-3-pro",
        &[
            ("preview", "2025-11-18", None, false),
            ("latest", "2025-11-18", None, true),
        ],
    ),
];

const META: ModelTable = &[
    (
        "llama-2",
        &[
            ("7b", "2023-07-18", None, false),
            ("13b", "2023-07-18", None, false),
            ("70b", "2023-07-18", None, true),
        ],
    ),
    (
        "llama-3",
        &[("8b", "2024-04-18", None, true), ("70b", "2024-04-18", None, true)],
    ),
    (
        "llama-3.1",
        &[
            ("8b", "2024-07-23", None, true),
            ("70b", "2024-07-23", None, true),
            ("405b", "2024-07-23", None, true),
        ],
    ),
    (
        "llama-3.2",
        &[
            ("1b", "2024-09-25", None, true),
            ("3b", "2024-09-25", None, true),
            ("11b", "2024-09-25", None, true),
            ("90b", "2024-09-25", None, true),
        ],
    ),
    ("llama-3.3", &[("70b", "2024-12-06", None, true)]),
    (
        "llama-4",
        &[
            ("scout", "2025-04-05", None, true),
            ("maverick", "2025-04-05", None, true),
        ],
    ),
];

const MISTRAL: ModelTable = &[
    (
        "mistral-7b",
        &[
            ("v0.1", "2023-09-27", None, false),
            ("v0.2", "2024-01-01", None, true),
            ("v0.3", "2024-05-22", None, true),
        ],
    ),
    ("mixtral-8x7b", &[("v0.1", "2023-12-11", None, true)]),
    ("mixtral-8x22b", &[("v0.1", "2024-04-17", None, true)]),
    (
        "mistral-large",
        &[
            ("2402", "2024-02-26", None, false),
            ("2407", "2024-07-24", None, true),
            ("2411", "2024-11-18", None, true),
        ],
    ),
    (
        "mistral-small",
        &[
            ("2402", "2024-02-26", None, false),
            ("2409", "2024-09-18", None, true),
        ],
    ),
    ("codestral", &[("2405", "2024-05-29", None, true)]),
    (
        "pixtral",
        &[
            ("12b-2409", "2024-09-17", None, true),
            ("large-2411", "2024-11-18", None, true),
        ],
    ),
];

const COHERE: ModelTable = &[
    (
        "command",
        &[
            ("command", "2023-03-01", None, false),
            ("command-light", "2023-03-01", None, false),
            ("command-nightly", "2023-03-01", None, false),
        ],
    ),
    (
        "command-r",
        &[
            ("command-r", "2024-03-11", None, true),
            ("command-r-plus", "2024-04-04", None, true),
            ("command-r-08-2024", "2024-08-01", None, true),
            ("command-r-plus-08-2024", "2024-08-01", None, true),
        ],
    ),
    (
        "command-a",
        &[("command-a-03-2025", "2025-03-01", None, true)],
    ),
];

/// `(provider key, display name, models)`
const CATALOG: &[(&str, &str, ModelTable)] = &[
    ("openai", "OpenAI", OPENAI),
    ("anthropic", "Anthropic", ANTHROPIC),
    ("google", "Google", GOOGLE),
    ("meta", "Meta", META),
    ("mistral", "Mistral AI", MISTRAL),
    ("cohere", "Cohere", COHERE),
];

/// SDK package name to provider key. `multiple` marks provider-agnostic toolkits.
pub const SDK_TO_PROVIDER: &[(&str, &str)] = &[
    ("openai", "openai"),
    ("@azure/openai", "openai"),
    ("@anthropic-ai/sdk", "anthropic"),
    ("anthropic", "anthropic"),
    ("@google/generative-ai", "google"),
    ("@google-cloud/vertexai", "google"),
    ("google-generativeai", "google"),
    ("langchain", "multiple"),
    ("@langchain/openai", "openai"),
    ("@langchain/anthropic", "anthropic"),
    ("@langchain/google-genai", "google"),
    ("@langchain/cohere", "cohere"),
    ("@langchain/mistralai", "mistral"),
    ("cohere-ai", "cohere"),
    ("cohere", "cohere"),
    ("@mistralai/mistralai", "mistral"),
    ("mistralai", "mistral"),
    ("llamaindex", "multiple"),
    ("ai", "multiple"),
    ("@ai-sdk/openai", "openai"),
    ("@ai-sdk/anthropic", "anthropic"),
    ("@ai-sdk/google", "google"),
    ("@ai-sdk/mistral", "mistral"),
    ("@ai-sdk/cohere", "cohere"),
    ("@huggingface/inference", "huggingface"),
    ("huggingface_hub", "huggingface"),
    ("replicate", "replicate"),
    ("together-ai", "together"),
    ("ollama", "ollama"),
    ("ollama-ai-provider", "ollama"),
];

/// Python distribution names (lowercased) to provider key.
pub const PYTHON_SDK_TO_PROVIDER: &[(&str, &str)] = &[
    ("openai", "openai"),
    ("anthropic", "anthropic"),
    ("google-generativeai", "google"),
    ("cohere", "cohere"),
    ("mistralai", "mistral"),
    ("langchain", "multiple"),
    ("langchain-openai", "openai"),
    ("langchain-anthropic", "anthropic"),
    ("langchain-google-genai", "google"),
    ("huggingface-hub", "huggingface"),
    ("transformers", "huggingface"),
    ("replicate", "replicate"),
    ("ollama", "ollama"),
];

/// A model name as it appears in code, and the catalog entry it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelPattern {
    pub pattern: &'static str,
    pub provider: &'static str,
    pub model: &'static str,
}

const fn pat(pattern: &'static str, provider: &'static str, model: &'static str) -> ModelPattern {
    ModelPattern {
        pattern,
        provider,
        model,
    }
}

/// Model identifiers to look for in source and config files.
pub const MODEL_PATTERNS: &[ModelPattern] = &[
    pat("gpt-4o", "openai", "gpt-4o"),
    pat("gpt-4o-mini", "openai", "gpt-4o-mini"),
    pat("gpt-4-turbo", "openai", "gpt-4"),
    pat("gpt-4", "openai", "gpt-4"),
    pat("gpt-3.5-turbo", "openai", "gpt-3.5-turbo"),
    pat("o1", "openai", "o1"),
    pat("o1-mini", "openai", "o1-mini"),
    pat("o1-preview", "openai", "o1"),
    pat("o3-mini", "openai", "o3-mini"),
    pat("gpt-5", "openai", "gpt-5"),
    pat("gpt-5.1", "openai", "gpt-5.1"),
    pat("gpt-5-mini", "openai", "gpt-5-mini"),
    pat("gpt-5-nano", "openai", "gpt-5-nano"),
    pat("gpt-5-pro", "openai", "gpt-5-pro"),
    pat("gpt-4.1", "openai", "gpt-4.1"),
    pat("claude-3-opus", "anthropic", "claude-3-opus"),
    pat("claude-3-sonnet", "anthropic", "claude-3-sonnet"),
    pat("claude-3-haiku", "anthropic", "claude-3-haiku"),
    pat("claude-3-5-sonnet", "anthropic", "claude-3.5-sonnet"),
    pat("claude-3.5-sonnet", "anthropic", "claude-3.5-sonnet"),
    pat("claude-3-5-haiku", "anthropic", "claude-3.5-haiku"),
    pat("claude-3.5-haiku", "anthropic", "claude-3.5-haiku"),
    pat("claude-sonnet-4", "anthropic", "claude-sonnet-4"),
    pat("claude-opus-4", "anthropic", "claude-opus-4"),
    pat("claude-sonnet-4.5", "anthropic", "claude-sonnet-4.5"),
    pat("claude-sonnet-4-5", "anthropic", "claude-sonnet-4.5"),
    pat("claude-opus-4.1", "anthropic", "claude-opus-4.1"),
    pat("claude-opus-4-1", "anthropic", "claude-opus-4.1"),
    pat("gemini-pro", "google", "gemini-pro"),
    pat("gemini-1.5-pro", "google", "gemini-1.5-pro"),
    pat("gemini-1.5-flash", "google", "gemini-1.5-flash"),
    pat("gemini-2.0-flash", "google", "gemini-2.0-flash"),
    pat("gemini-2.5-pro", "google", "gemini-2.5-pro"),
    pat("gemini-2.5-flash", "google", "gemini-2.5-flash"),
    pat("gemini-3-pro", "google", "gemini-3-pro"),
    pat("mistral-large", "mistral", "mistral-large"),
    pat("mistral-small", "mistral", "mistral-small"),
    pat("codestral", "mistral", "codestral"),
    pat("llama-3", "meta", "llama-3"),
    pat("llama-3.1", "meta", "llama-3.1"),
    pat("llama-3.2", "meta", "llama-3.2"),
    pat("llama3", "meta", "llama-3"),
    pat("llama3.1", "meta", "llama-3.1"),
    pat("llama3.2", "meta", "llama-3.2"),
];

/// [`MODEL_PATTERNS`] ordered longest pattern first, so `gpt-4o-mini` is
/// tried before `gpt-4o` and `gpt-4`.
pub fn model_patterns() -> Vec<&'static ModelPattern> {
    let mut patterns: Vec<&ModelPattern> = MODEL_PATTERNS.iter().collect();
    patterns.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
    patterns
}

fn provider_entry(provider: &str) -> Option<&'static (&'static str, &'static str, ModelTable)> {
    CATALOG
        .iter()
        .find(|(key, _, _)| key.eq_ignore_ascii_case(provider))
}

/// Provider keys in catalog order.
pub fn providers() -> Vec<&'static str> {
    CATALOG.iter().map(|(key, _, _)| *key).collect()
}

/// Human-readable provider name (`"openai"` -> `"OpenAI"`).
pub fn provider_display_name(provider: &str) -> Option<&'static str> {
    provider_entry(provider).map(|(_, name, _)| *name)
}

/// Model names known for `provider`; empty for unknown providers.
pub fn provider_models(provider: &str) -> Vec<&'static str> {
    provider_entry(provider)
        .map(|(_, _, models)| models.iter().map(|(name, _)| *name).collect())
        .unwrap_or_default()
}

/// Lifecycle records for `provider`/`model`.
///
/// The provider is matched case-insensitively. The model is tried exactly,
/// then case-insensitively with a trailing `-YYYYMMDD` stamp removed
/// (`claude-3-opus-20240229` finds `claude-3-opus`).
pub fn model_cycles(provider: &str, model: &str) -> Option<Vec<AiModelCycle>> {
    let (_, _, models) = provider_entry(provider)?;

    let rows = models
        .iter()
        .find(|(name, _)| *name == model)
        .or_else(|| {
            let stripped = strip_date_stamp(model).to_ascii_lowercase();
            models
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&stripped))
        })
        .map(|(_, rows)| *rows)?;

    Some(rows.iter().map(to_cycle).collect())
}

/// Provider key for an npm/PyPI SDK package, if it is an AI SDK.
pub fn sdk_provider(package: &str) -> Option<&'static str> {
    SDK_TO_PROVIDER
        .iter()
        .find(|(sdk, _)| *sdk == package)
        .map(|(_, provider)| *provider)
}

/// Provider key for a Python distribution name (case-insensitive).
pub fn python_sdk_provider(package: &str) -> Option<&'static str> {
    PYTHON_SDK_TO_PROVIDER
        .iter()
        .find(|(sdk, _)| sdk.eq_ignore_ascii_case(package))
        .map(|(_, provider)| *provider)
}

fn strip_date_stamp(model: &str) -> &str {
    match model.rsplit_once('-') {
        Some((head, stamp)) if stamp.len() == 8 && stamp.bytes().all(|b| b.is_ascii_digit()) => {
            head
        }
        _ => model,
    }
}

fn to_cycle(row: &Row) -> AiModelCycle {
    let (cycle, released, eol, lts) = *row;
    let eol = match eol {
        Some(date) => DateOrFlag::Date(date.to_string()),
        None => DateOrFlag::Flag(false),
    };
    let mut record = AiModelCycle::new(cycle, eol).lts(lts);
    record.release_date = Some(released.to_string());
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_and_display_names() {
        assert_eq!(
            providers(),
            vec!["openai", "anthropic", "google", "meta", "mistral", "cohere"]
        );
        assert_eq!(provider_display_name("MISTRAL"), Some("Mistral AI"));
        assert_eq!(provider_display_name("acme"), None);
    }

    #[test]
    fn exact_model_lookup() {
        let cycles = model_cycles("OpenAI", "gpt-4").unwrap();
        assert_eq!(cycles.len(), 6);
        assert_eq!(cycles[1].cycle, "0613");
        assert_eq!(cycles[1].eol, DateOrFlag::Date("2024-06-13".to_string()));
        assert_eq!(cycles[1].release_date.as_deref(), Some("2023-06-13"));
        assert!(cycles[5].lts);
    }

    #[test]
    fn date_stamped_model_lookup() {
        let cycles = model_cycles("anthropic", "Claude-3-Opus-20240229").unwrap();
        assert_eq!(cycles[0].cycle, "20240229");
        assert!(model_cycles("anthropic", "claude-9").is_none());
        assert!(model_cycles("acme", "gpt-4").is_none());
    }

    #[test]
    fn strip_only_eight_digit_suffix() {
        assert_eq!(strip_date_stamp("claude-3-haiku-20240307"), "claude-3-haiku");
        assert_eq!(strip_date_stamp("gpt-4-0613"), "gpt-4-0613");
        assert_eq!(strip_date_stamp("short"), "short");
    }

    #[test]
    fn provider_model_listing() {
        let models = provider_models("google");
        assert!(models.contains(&"gemini-1.5-pro"));
        assert!(provider_models("nobody").is_empty());
    }

    #[test]
    fn sdk_tables() {
        assert_eq!(sdk_provider("@anthropic-ai/sdk"), Some("anthropic"));
        assert_eq!(sdk_provider("ai"), Some("multiple"));
        assert_eq!(sdk_provider("left-pad"), None);
        assert_eq!(python_sdk_provider("Transformers"), Some("huggingface"));
    }

    #[test]
    fn longer_patterns_come_first() {
        let ordered = model_patterns();
        let pos = |p: &str| ordered.iter().position(|m| m.pattern == p).unwrap();
        assert!(pos("gpt-4o-mini") < pos("gpt-4o"));
        assert!(pos("gpt-4o") < pos("gpt-4"));
        assert!(pos("claude-sonnet-4.5") < pos("claude-sonnet-4"));
    }

    #[test]
    fn every_pattern_with_catalog_provider_resolves() {
        for p in MODEL_PATTERNS {
            assert!(
                model_cycles(p.provider, p.model).is_some(),
                "{} -> {}/{}",
                p.pattern,
                p.provider,
                p.model
            );
        }
    }
}
