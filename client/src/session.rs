use common::{GAME_ID_PARAM, SessionId};
use url::Url;

/// Current game session and the shareable link pointing at it.
#[derive(Debug, Clone)]
pub struct SessionLink {
    page_url: Url,
    session_id: Option<SessionId>,
    share_url: Url,
}

impl SessionLink {
    /// Picks up a session id from the `gameId` query parameter, if any.
    pub fn from_page_url(page_url: Url) -> Self {
        let initial = page_url
            .query_pairs()
            .find(|(key, _)| key == GAME_ID_PARAM)
            .and_then(|(_, value)| SessionId::new(value.into_owned()))
            .filter(|id| id.as_str() != "null");

        let mut link = Self {
            share_url: page_url.clone(),
            page_url,
            session_id: None,
        };
        if let Some(id) = initial {
            link.set(id);
        }
        link
    }

    pub fn set(&mut self, id: SessionId) {
        let others: Vec<(String, String)> = self
            .page_url
            .query_pairs()
            .filter(|(key, _)| key != GAME_ID_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut share_url = self.page_url.clone();
        share_url
            .query_pairs_mut()
            .clear()
            .extend_pairs(others)
            .append_pair(GAME_ID_PARAM, id.as_str());

        self.share_url = share_url;
        self.session_id = Some(id);
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn share_url(&self) -> &Url {
        &self.share_url
    }
}
