use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use crate::error::AppError;

use super::models::{ManifestDto, MatchupFileDto, PatchMetaDto, RoleFileDto};
use super::{DataSource, Hero, PatchMeta};

/// Fetches the same documents as `FsSource` over HTTP:
/// `<base>/patches.json`, `<base>/heroes.json`,
/// `<base>/counter/<patch>/<slug>.json`, `<base>/roles/<patch>/<slug>.json`.
pub struct HttpSource {
    base_url: String,
    agent: ureq::Agent,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

#[derive(Debug, serde::Deserialize)]
struct PatchListDto {
    #[serde(default)]
    patches: Vec<String>,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        // 10 req/sec keeps a full-roster fan-out polite to a static host.
        let rate_limiter = RateLimiter::direct(Quota::per_second(NonZeroU32::new(10).unwrap()));
        HttpSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(10))
                .build(),
            rate_limiter,
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base_url, path);

        let mut retry_count = 0;
        const MAX_RETRIES: u32 = 3;

        loop {
            while self.rate_limiter.check().is_err() {
                thread::sleep(Duration::from_millis(25));
            }

            let response = self
                .agent
                .get(&url)
                .set("User-Agent", "dota-counter/0.1.0")
                .call();

            match response {
                Ok(resp) => {
                    let body = resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()))?;
                    return serde_json::from_str(&body)
                        .map_err(|e| AppError::JsonError(format!("{}: {}", url, e)));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    thread::sleep(Duration::from_millis(500 * (retry_count + 1) as u64));
                    retry_count += 1;
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }
}

impl DataSource for HttpSource {
    fn list_patches(&self) -> Result<Vec<String>, AppError> {
        let mut dto: PatchListDto = self.get_json("patches.json")?;
        dto.patches.sort();
        if dto.patches.is_empty() {
            return Err(AppError::NoPatches(self.base_url.clone()));
        }
        Ok(dto.patches)
    }

    fn patch_meta(&self, patch: &str) -> Result<PatchMeta, AppError> {
        match self.get_json::<PatchMetaDto>(&format!("counter/{}/patch.json", patch)) {
            Ok(dto) => Ok(PatchMeta {
                patch: dto.patch,
                updated_at: dto.updated_at,
            }),
            Err(_) => Ok(PatchMeta {
                patch: patch.to_string(),
                updated_at: None,
            }),
        }
    }

    fn manifest(&self, _patch: &str) -> Result<Vec<Hero>, AppError> {
        let dto: ManifestDto = self.get_json("heroes.json")?;
        Ok(dto
            .heroes
            .into_iter()
            .map(|h| Hero {
                name: h.name.unwrap_or_else(|| h.slug.clone()),
                slug: h.slug.to_lowercase(),
                image: h.image,
            })
            .collect())
    }

    fn matchups(&self, patch: &str, slug: &str) -> Result<MatchupFileDto, AppError> {
        self.get_json(&format!("counter/{}/{}.json", patch, slug))
    }

    fn roles(&self, patch: &str, slug: &str) -> Result<RoleFileDto, AppError> {
        self.get_json(&format!("roles/{}/{}.json", patch, slug))
    }
}
