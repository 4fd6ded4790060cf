//! Демонстрационные данные для списков, которые показываются, когда сервер
//! недоступен (отключается флагом `--no-fallback`).

use serde_json::json;
use smm_client::models::{Character, Trend, VideoAnalysis};

pub fn trends() -> serde_json::Result<Vec<Trend>> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "keyword": "AI Revolution",
            "platform": "twitter",
            "category": "technology",
            "engagement_score": 9.8,
            "volume": 45000,
            "growth_rate": 15.2,
            "sentiment": "positive"
        },
        {
            "id": 2,
            "keyword": "Sustainable Living",
            "platform": "instagram",
            "category": "lifestyle",
            "engagement_score": 9.4,
            "volume": 32000,
            "growth_rate": 12.8,
            "sentiment": "positive"
        }
    ]))
}

pub fn characters() -> serde_json::Result<Vec<Character>> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "user_id": 1,
            "name": "Tech Innovator",
            "description": "Cutting-edge technology content creator",
            "tone": "informative",
            "target_audience": "Tech professionals, developers",
            "content_style": "Technical, educational",
            "dialogue_style": "Clear, precise, jargon-friendly",
            "visual_wardrobe": "Smart casual, tech-branded apparel",
            "visual_props": "Gadgets, computer setups, VR headsets",
            "visual_background": "Futuristic lab, minimalist workspace",
            "preferred_platforms": ["twitter", "linkedin"],
            "keywords": ["AI", "technology", "innovation"]
        }
    ]))
}

pub fn video_analyses() -> serde_json::Result<Vec<VideoAnalysis>> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "video_url": "https://example.com/video1.mp4",
            "platform": "tiktok",
            "transcription_text": "Hey everyone! Today I want to share with you this amazing productivity hack that has completely changed my workflow.",
            "visual_description": "A young professional in a modern home office with a laptop, ring light and plants.",
            "analysis_date": "2024-08-23T10:30:00Z",
            "engagement_score": 85,
            "trending_elements": ["productivity", "AI automation", "home office setup"],
            "sentiment": "positive",
            "duration": "00:01:23"
        },
        {
            "id": 2,
            "video_url": "https://example.com/video2.mp4",
            "platform": "instagram",
            "transcription_text": "Quick morning routine that keeps me energized all day!",
            "visual_description": "Bright, airy bedroom with natural lighting and a clean minimalist aesthetic.",
            "analysis_date": "2024-08-23T09:15:00Z",
            "engagement_score": 92,
            "trending_elements": ["morning routine", "wellness", "self-care"],
            "sentiment": "positive",
            "duration": "00:00:45"
        }
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_trends_decode() {
        let trends = trends().unwrap();
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].keyword, "AI Revolution");
        assert_eq!(trends[1].volume, Some(32000));
    }

    #[test]
    fn demo_characters_decode() {
        let characters = characters().unwrap();
        assert_eq!(characters[0].preferred_platforms, vec!["twitter", "linkedin"]);
    }

    #[test]
    fn demo_video_analyses_decode() {
        let analyses = video_analyses().unwrap();
        assert_eq!(analyses.len(), 2);
        assert!(analyses.iter().all(|analysis| analysis.analysis_date.is_some()));
        assert_eq!(analyses[0].duration.as_deref(), Some("00:01:23"));
    }
}
