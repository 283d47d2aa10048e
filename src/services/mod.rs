//! External collaborators: market data and notifications.

pub mod market_data;
pub mod notifier;
pub mod yahoo;

pub use market_data::{InMemoryMarketDataProvider, MarketDataError, MarketDataProvider};
pub use notifier::{ConsoleNotifier, Notifier, NotifierSet, SpeechNotifier};
pub use yahoo::YahooMarketDataProvider;
