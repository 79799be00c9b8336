//! Token bucket pacing for outbound page requests.

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Token bucket limiting requests per minute.
///
/// Tokens refill at a constant rate. The bucket starts full so a short run
/// of pages is fetched without delay.
pub struct TokenBucket {
    state: Mutex<BucketState>,
}

struct BucketState {
    capacity: f32,
    tokens: f32,
    /// Tokens added per second.
    refill_rate: f32,
    last_refill: Instant,
}

impl BucketState {
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f32();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }

    /// Take a token or report how long until one is available.
    fn try_acquire(&mut self) -> Result<(), Duration> {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            Ok(())
        } else {
            let tokens_needed = 1.0 - self.tokens;
            Err(Duration::from_secs_f32(tokens_needed / self.refill_rate))
        }
    }
}

impl TokenBucket {
    /// `requests_per_minute` must be non-zero.
    pub fn new(requests_per_minute: u32) -> Self {
        let capacity = requests_per_minute.max(1) as f32;
        Self {
            state: Mutex::new(BucketState {
                capacity,
                tokens: capacity,
                refill_rate: capacity / 60.0,
                last_refill: Instant::now(),
            }),
        }
    }

    pub async fn try_acquire(&self) -> Result<(), Duration> {
        self.state.lock().await.try_acquire()
    }

    /// Wait until a token is available, then take it.
    pub async fn acquire(&self) {
        loop {
            let wait = match self.try_acquire().await {
                Ok(()) => return,
                Err(wait) => wait,
            };
            sleep(wait).await;
        }
    }

    pub async fn tokens_available(&self) -> f32 {
        let mut state = self.state.lock().await;
        state.refill();
        state.tokens
    }
}
