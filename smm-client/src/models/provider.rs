use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// AI-провайдер и доступные у него модели.
pub struct Provider {
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub models: Vec<String>,
}

/// Модели провайдера `name` из уже полученного списка; пусто, если такого нет.
pub fn models_for(providers: &[Provider], name: &str) -> Vec<String> {
    providers
        .iter()
        .find(|provider| provider.name == name)
        .map(|provider| provider.models.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str, models: &[&str]) -> Provider {
        Provider {
            name: name.to_string(),
            models: models.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn returns_models_of_matching_provider() {
        let providers = vec![
            provider("openai", &["gpt-4", "whisper-1"]),
            provider("anthropic", &["claude-3-opus"]),
        ];
        assert_eq!(models_for(&providers, "anthropic"), vec!["claude-3-opus"]);
    }

    #[test]
    fn unknown_provider_has_no_models() {
        let providers = vec![provider("openai", &["gpt-4"])];
        assert!(models_for(&providers, "OpenAI").is_empty());
        assert!(models_for(&[], "openai").is_empty());
    }
}
