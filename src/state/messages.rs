use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use odds_feed::Feed;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadFeed,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    FeedLoaded { feed: Feed },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
