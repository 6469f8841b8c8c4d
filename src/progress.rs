use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives progress from the batch controller as addresses complete.
pub trait Progress: Send {
    fn start(&mut self, total: usize);
    fn advance(&mut self, done: usize, total: usize);
    fn finish(&mut self);
}

/// Discards all updates.
#[derive(Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _total: usize) {}
    fn advance(&mut self, _done: usize, _total: usize) {}
    fn finish(&mut self) {}
}

/// Twenty-column ASCII bar on stderr. Hidden when stderr is not a terminal.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub const WIDTH: u64 = 20;

    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(Self::WIDTH), ProgressDrawTarget::stderr());
        let style = ProgressStyle::with_template("[{bar:20}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("-- ");
        bar.set_style(style);
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn start(&mut self, total: usize) {
        self.bar.reset();
        self.bar.set_message(format!("0/{}", total));
    }

    fn advance(&mut self, done: usize, total: usize) {
        self.bar.set_position(bar_position(done, total));
        self.bar.set_message(format!("{}/{}", done, total));
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}

/// Filled columns for `done` of `total`, rounded up like the classic dash bar.
pub fn bar_position(done: usize, total: usize) -> u64 {
    if total == 0 {
        return BarProgress::WIDTH;
    }
    let done = done.min(total) as u64;
    (done * BarProgress::WIDTH).div_ceil(total as u64)
}
