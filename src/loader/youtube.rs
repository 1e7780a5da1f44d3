use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

use crate::error::LoadError;
use crate::loader::{ContentDocument, ContentLoader};

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

static TEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("text").expect("Failed to parse text selector")
});

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Loads the caption track of a YouTube video. Only the transcript is
/// fetched, never the video metadata.
#[derive(Clone)]
pub struct YoutubeLoader {
    client: Client,
    base_url: String,
    languages: Vec<String>,
}

impl YoutubeLoader {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_YOUTUBE_BASE_URL.into(),
            languages: vec!["en".into()],
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    async fn get_text(&self, url: &str) -> Result<String, LoadError> {
        let response = self
            .client
            .get(url)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

impl ContentLoader for YoutubeLoader {
    async fn load(&self, url: &Url) -> Result<Vec<ContentDocument>, LoadError> {
        let video_id = extract_video_id(url).ok_or_else(|| LoadError::VideoId(url.to_string()))?;

        let watch_page = self
            .get_text(&format!("{}/watch?v={}", self.base_url, video_id))
            .await?;
        let tracks = parse_caption_tracks(&watch_page)?;
        let track =
            select_track(&tracks, &self.languages).ok_or_else(|| LoadError::NoTranscript {
                video_id: video_id.clone(),
                languages: self.languages.clone(),
            })?;
        tracing::debug!(
            %video_id,
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        let timed_text = self.get_text(&track.base_url).await?;
        let transcript = parse_timed_text(&timed_text);
        if transcript.is_empty() {
            return Err(LoadError::EmptyContent(url.to_string()));
        }

        Ok(vec![ContentDocument::new(video_id, transcript)])
    }
}

/// Pulls the video id out of the usual YouTube URL shapes.
pub fn extract_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = match host {
        "youtu.be" => segments.next()?.to_string(),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?,
            "shorts" | "embed" | "live" | "v" => segments.next()?.to_string(),
            _ => return None,
        },
        _ => return None,
    };

    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}

fn parse_caption_tracks(watch_page: &str) -> Result<Vec<CaptionTrack>, LoadError> {
    let Some(start) = watch_page.find(CAPTION_TRACKS_KEY) else {
        return Ok(Vec::new());
    };

    let rest = &watch_page[start + CAPTION_TRACKS_KEY.len()..];
    serde_json::Deserializer::from_str(rest)
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .unwrap_or_else(|| Ok(Vec::new()))
        .map_err(|e| LoadError::Transcript(e.to_string()))
}

/// Picks the first requested language that has a track, preferring manual
/// captions over generated ones for the same language.
fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|language| {
        let mut matching = tracks
            .iter()
            .filter(|track| track.language_code.eq_ignore_ascii_case(language));
        let first = matching.next()?;
        if !first.is_generated() {
            return Some(first);
        }
        matching.find(|track| !track.is_generated()).or(Some(first))
    })
}

fn parse_timed_text(xml: &str) -> String {
    let fragment = Html::parse_fragment(xml);

    // Caption payloads are escaped twice; the parser only undoes the first layer.
    fragment
        .select(&TEXT_SELECTOR)
        .map(|element| {
            let raw = element.text().collect::<String>();
            html_escape::decode_html_entities(&raw).into_owned()
        })
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
