use super::segment::{TranscriptFetcher, TranscriptSegment};
use crate::error::{RelayError, RelayResult};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/85.0.4183.83 Safari/537.36,gzip(gfe)";

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?|shorts|live)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
        )
        .expect("video id pattern is valid")
    })
}

fn timedtext_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<text start="([^"]*)" dur="([^"]*)"[^>]*>([^<]*)</text>"#)
            .expect("timed text pattern is valid")
    })
}

/// Extract the 11-character video id from a bare id or any YouTube URL form
pub fn extract_video_id(reference: &str) -> RelayResult<String> {
    let reference = reference.trim();

    let is_bare_id = reference.len() == 11
        && reference
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if is_bare_id {
        return Ok(reference.to_string());
    }

    video_id_regex()
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            RelayError::TranscriptUnavailable(format!(
                "Could not extract a video id from {:?}",
                reference
            ))
        })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionsBlob {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: String,
}

/// Pull the caption track list out of a watch page
fn caption_tracks(html: &str, video_id: &str) -> RelayResult<Vec<CaptionTrack>> {
    let Some((_, after)) = html.split_once("\"captions\":") else {
        let reason = if html.contains("class=\"g-recaptcha\"") {
            "YouTube is receiving too many requests from this address".to_string()
        } else if !html.contains("\"playabilityStatus\":") {
            format!("Video {} is no longer available", video_id)
        } else {
            format!("Transcripts are disabled for video {}", video_id)
        };
        return Err(RelayError::TranscriptUnavailable(reason));
    };

    let blob = after
        .split_once(",\"videoDetails")
        .map(|(captions, _)| captions)
        .unwrap_or(after)
        .replace('\n', "");

    let captions: CaptionsBlob = serde_json::from_str(&blob).map_err(|e| {
        RelayError::TranscriptUnavailable(format!(
            "Unreadable caption metadata for video {}: {}",
            video_id, e
        ))
    })?;

    let tracks = captions
        .player_captions_tracklist_renderer
        .map(|renderer| renderer.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(RelayError::TranscriptUnavailable(format!(
            "No transcripts are available for video {}",
            video_id
        )));
    }

    Ok(tracks)
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
}

/// Parse a timed-text XML document into segments
fn parse_timedtext(xml: &str) -> Vec<TranscriptSegment> {
    timedtext_regex()
        .captures_iter(xml)
        .map(|caps| TranscriptSegment {
            text: Some(decode_entities(&caps[3])),
            timestamp: caps[1].parse().unwrap_or(0.0),
            duration: caps[2].parse().unwrap_or(0.0),
        })
        .collect()
}

/// Fetches captions by scraping the YouTube watch page
pub struct YouTubeTranscriptFetcher {
    client: Client,
    lang: Option<String>,
}

impl YouTubeTranscriptFetcher {
    pub fn new(lang: Option<String>) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                RelayError::TranscriptUnavailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, lang })
    }

    async fn get_text(&self, url: &str) -> RelayResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RelayError::TranscriptUnavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::TranscriptUnavailable(format!(
                "HTTP {} from {}",
                status, url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| RelayError::TranscriptUnavailable(format!("Unreadable response: {}", e)))
    }

    fn pick_track<'a>(&self, tracks: &'a [CaptionTrack]) -> RelayResult<&'a CaptionTrack> {
        self.lang
            .as_deref()
            .and_then(|lang| tracks.iter().find(|t| t.language_code == lang))
            .or_else(|| tracks.first())
            .ok_or_else(|| {
                RelayError::TranscriptUnavailable("No caption tracks to choose from".into())
            })
    }
}

#[async_trait]
impl TranscriptFetcher for YouTubeTranscriptFetcher {
    async fn fetch(&self, video: &str) -> RelayResult<Vec<TranscriptSegment>> {
        let video_id = extract_video_id(video)?;
        info!("Fetching transcript for video {}", video_id);

        let html = self
            .get_text(&format!("{}{}", WATCH_URL, video_id))
            .await?;
        let tracks = caption_tracks(&html, &video_id)?;
        let track = self.pick_track(&tracks)?;
        debug!("Using caption track {:?}", track.language_code);

        let xml = self.get_text(&track.base_url).await?;
        let segments = parse_timedtext(&xml);
        if segments.is_empty() {
            return Err(RelayError::TranscriptUnavailable(format!(
                "Transcript for video {} is empty",
                video_id
            )));
        }

        info!("Fetched {} transcript segments", segments.len());
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bare_id() {
        assert_eq!(extract_video_id("n2Fluyr3lbc").unwrap(), "n2Fluyr3lbc");
    }

    #[test]
    fn test_extract_from_urls() {
        let urls = [
            "https://www.youtube.com/watch?v=n2Fluyr3lbc",
            "https://www.youtube.com/watch?feature=share&v=n2Fluyr3lbc&t=10",
            "https://youtu.be/n2Fluyr3lbc",
            "https://www.youtube.com/embed/n2Fluyr3lbc",
            "https://www.youtube.com/shorts/n2Fluyr3lbc",
        ];
        for url in urls {
            assert_eq!(extract_video_id(url).unwrap(), "n2Fluyr3lbc", "{}", url);
        }
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let err = extract_video_id("not a video").unwrap_err();
        assert_eq!(err.kind(), "transcript_unavailable");
    }

    #[test]
    fn test_caption_tracks_from_page() {
        let html = r#"<script>var x = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://example.test/tt?lang=en","languageCode":"en"},{"baseUrl":"https://example.test/tt?lang=fr","languageCode":"fr"}]}},"videoDetails":{"videoId":"abc"}}</script>"#;

        let tracks = caption_tracks(html, "abc").unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[1].language_code, "fr");
        assert_eq!(tracks[0].base_url, "https://example.test/tt?lang=en");
    }

    #[test]
    fn test_caption_tracks_missing() {
        let disabled = r#"{"playabilityStatus":{"status":"OK"}}"#;
        let err = caption_tracks(disabled, "abc").unwrap_err();
        assert!(err.to_string().contains("disabled"));

        let gone = "<html></html>";
        let err = caption_tracks(gone, "abc").unwrap_err();
        assert!(err.to_string().contains("no longer available"));
    }

    fn track(lang: &str) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://example.test/tt?lang={}", lang),
            language_code: lang.to_string(),
        }
    }

    #[test]
    fn test_pick_track_prefers_configured_language() {
        let tracks = [track("en"), track("fr")];

        let fetcher = YouTubeTranscriptFetcher::new(Some("fr".to_string())).unwrap();
        assert_eq!(fetcher.pick_track(&tracks).unwrap().language_code, "fr");

        let fetcher = YouTubeTranscriptFetcher::new(Some("de".to_string())).unwrap();
        assert_eq!(fetcher.pick_track(&tracks).unwrap().language_code, "en");
    }

    #[test]
    fn test_pick_track_with_no_tracks() {
        let fetcher = YouTubeTranscriptFetcher::new(None).unwrap();

        let err = fetcher.pick_track(&[]).unwrap_err();
        assert_eq!(err.kind(), "transcript_unavailable");
    }

    #[test]
    fn test_parse_timedtext() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.5" dur="2.1">hello &amp;#39;world&amp;#39;</text><text start="2.6" dur="1">a &lt; b</text></transcript>"#;

        let segments = parse_timedtext(xml);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text.as_deref(), Some("hello 'world'"));
        assert_eq!(segments[0].timestamp, 0.5);
        assert_eq!(segments[1].text.as_deref(), Some("a < b"));
        assert_eq!(segments[1].duration, 1.0);
    }
}
