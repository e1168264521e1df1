use chrono::{DateTime, Duration, Utc};

use crate::config::DumpConfig;
use crate::error::AssemblyError;
use crate::query::{LastModRange, Query, ResourceType};

use super::types::{join_dir, name_join, DumpTask, WorkQueue};

const BY_CHANNEL: &str = "bychannel";
const BY_TOUR_TYPE: &str = "bytourtype";
const ALL_CHANNELS: &str = "allchannels-pub";

/// Expands the product, channel and tour-type dimensions into tasks.
///
/// `now` anchors every period window so one run uses a single reference
/// time. Order of the output follows the nesting: products first, then each
/// channel with its tour types, then all channels combined per tour type.
pub fn assemble_products(cfg: &DumpConfig, now: DateTime<Utc>) -> Result<WorkQueue, AssemblyError> {
    if let Some(p) = cfg.periods.iter().find(|p| p.days == 0) {
        return Err(AssemblyError::EmptyPeriod(p.name.clone()));
    }

    let mut assembler = Assembler {
        cfg,
        now,
        queue: WorkQueue::new(),
    };
    let root = DumpTask::new(".", "", Query::new(ResourceType::Product));

    assembler.product_tasks(&root)?;
    assembler.channel_tasks(&root)?;
    assembler.all_channel_tasks(&root)?;

    tracing::debug!(
        target: "dhubdump.assembly",
        tasks = assembler.queue.len(),
        products = cfg.products.len(),
        channels = cfg.channels.len(),
        tour_types = cfg.tour_types.len(),
        "product tasks assembled"
    );
    Ok(assembler.queue)
}

struct Assembler<'a> {
    cfg: &'a DumpConfig,
    now: DateTime<Utc>,
    queue: WorkQueue,
}

impl Assembler<'_> {
    fn add(&mut self, task: &DumpTask) -> Result<(), AssemblyError> {
        self.queue.push(task.clone())
    }

    fn product_tasks(&mut self, root: &DumpTask) -> Result<(), AssemblyError> {
        let cfg = self.cfg;
        for product in &cfg.products {
            let node = DumpTask::new(
                root.directory.clone(),
                product.clone(),
                root.query.for_types([product.as_str()]),
            );
            self.pub_tasks(&node)?;
        }
        Ok(())
    }

    fn pub_tasks(&mut self, parent: &DumpTask) -> Result<(), AssemblyError> {
        let cfg = self.cfg;
        for &state in &cfg.pub_states {
            let task = DumpTask::new(
                parent.directory.clone(),
                name_join(&[parent.name.as_str(), state.key()]),
                parent.query.with_pub_state(state),
            );
            self.add(&task)?;
            self.period_tasks(&task)?;
        }
        Ok(())
    }

    fn period_tasks(&mut self, parent: &DumpTask) -> Result<(), AssemblyError> {
        let cfg = self.cfg;
        let to = self.now;
        let stamp_to = to.format("%Y%m%d").to_string();
        for period in &cfg.periods {
            let from = to - Duration::days(i64::from(period.days));
            let stamp_from = from.format("%Y%m%d").to_string();
            let range = if cfg.open_ended_periods {
                LastModRange::since(from)
            } else {
                LastModRange::between(from, to)
            };
            let task = DumpTask::new(
                parent.directory.clone(),
                name_join(&[
                    parent.name.as_str(),
                    period.name.as_str(),
                    stamp_from.as_str(),
                    stamp_to.as_str(),
                ]),
                parent.query.lastmod_between(range),
            );
            self.queue.push(task)?;
        }
        Ok(())
    }

    fn channel_tasks(&mut self, root: &DumpTask) -> Result<(), AssemblyError> {
        let cfg = self.cfg;
        for channel in &cfg.channels {
            let directory = join_dir(&root.directory, &format!("{BY_CHANNEL}/{channel}"));
            let pattern = format!("{channel}{}", cfg.channel_wildcard);
            let task = DumpTask::new(
                directory.clone(),
                name_join(&[root.name.as_str(), channel.as_str(), "pub-all"]),
                root.query
                    .published()
                    .for_types(cfg.products.iter().map(String::as_str))
                    .for_channels([pattern]),
            );
            self.add(&task)?;
            self.period_tasks(&task)?;

            // Tour-type tasks hang off a fresh, shorter-named parent.
            let parent = DumpTask::new(
                directory,
                name_join(&[root.name.as_str(), channel.as_str(), "pub"]),
                task.query.clone(),
            );
            self.tour_type_tasks(&parent)?;
        }
        Ok(())
    }

    fn all_channel_tasks(&mut self, root: &DumpTask) -> Result<(), AssemblyError> {
        let parent = DumpTask::new(
            root.directory.clone(),
            ALL_CHANNELS,
            root.query
                .for_types(self.cfg.products.iter().map(String::as_str))
                .published(),
        );
        self.tour_type_tasks(&parent)
    }

    fn tour_type_tasks(&mut self, parent: &DumpTask) -> Result<(), AssemblyError> {
        let cfg = self.cfg;
        let directory = join_dir(&parent.directory, BY_TOUR_TYPE);
        for tour_type in &cfg.tour_types {
            let task = DumpTask::new(
                directory.clone(),
                name_join(&[parent.name.as_str(), tour_type.as_str()]),
                parent.query.for_touristic_types([tour_type.as_str()]),
            );
            self.add(&task)?;
            self.period_tasks(&task)?;
        }
        Ok(())
    }
}
