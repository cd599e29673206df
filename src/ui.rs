use std::fmt::Display;

use anyhow::{Result, anyhow};
use indicatif::{MultiProgress, ProgressBar, ProgressBarIter, ProgressDrawTarget, ProgressStyle};
use log::{Level, LevelFilter, Log};

pub struct UiManager {
    progress_bars: MultiProgress,
    iterator_style: ProgressStyle,
}

impl UiManager {
    fn prefix(level: Level) -> impl Display {
        match level {
            Level::Trace => console::style(".").bold().white(),
            Level::Debug => console::style("?").bold().cyan(),
            Level::Info => console::style(">").bold().blue(),
            Level::Warn => console::style("!").bold().yellow(),
            Level::Error => console::style("X").bold().red(),
        }
    }

    /// Install the logger. Progress bars are hidden unless informational output is enabled.
    pub fn new(level: LevelFilter) -> Result<Self> {
        let iterator_style = "{bar} {human_pos}/{human_len} ({eta} remaining)";

        let progress_bars = if level >= LevelFilter::Info {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        log::set_logger(Box::leak(Logger(progress_bars.clone()).into()))
            .map_err(|err| anyhow!("Error setting logger: {err}"))?;
        log::set_max_level(level);

        Ok(Self {
            progress_bars,
            iterator_style: ProgressStyle::with_template(iterator_style)?,
        })
    }

    pub fn iter<I: ExactSizeIterator>(&self, iter: I) -> ProgressBarIter<I> {
        let len = u64::try_from(iter.len()).unwrap_or(u64::MAX);
        let progress_bar = ProgressBar::new(len).with_style(self.iterator_style.clone());
        self.progress_bars.add(progress_bar).wrap_iter(iter)
    }
}

struct Logger(MultiProgress);

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = format!("{}", record.args());
        let mut lines = message.lines();

        self.0.suspend(|| {
            if let Some(line) = lines.next() {
                eprintln!("{} {line}", UiManager::prefix(record.level()));
            }

            for line in lines {
                eprintln!("  {line}");
            }
        });
    }

    fn flush(&self) {}
}
