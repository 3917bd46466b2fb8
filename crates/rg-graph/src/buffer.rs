//! Hold road ways back until every node is known.
//!
//! PBF files usually store nodes before ways, but nothing guarantees it.
//! The reader pushes each way here while it streams the file and replays the
//! buffer into the [`GraphBuilder`] after the last element, so segment
//! resolution sees the complete node table whatever order the file used.
//!
//! Only ways with a `highway` tag are kept, and only the tags the builder
//! reads ([`ROUTING_KEYS`]) are copied.  Other ways are counted, not stored.

use rg_core::OsmNodeId;

use crate::builder::GraphBuilder;

/// Tag keys the builder consults; everything else is dropped while buffering.
pub const ROUTING_KEYS: [&str; 3] = ["highway", "maxspeed", "oneway"];

/// One buffered road way: node refs plus its routing tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BufferedWay {
    pub(crate) refs: Vec<OsmNodeId>,
    pub(crate) tags: Vec<(String, String)>,
}

/// Road ways waiting for the node table to fill.
#[derive(Debug, Default)]
pub struct WayBuffer {
    pub(crate) ways: Vec<BufferedWay>,
    skipped: u64,
}

impl WayBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a way if it carries `highway`; otherwise only count it.
    pub fn push<'a, R, T>(&mut self, refs: R, tags: T)
    where
        R: IntoIterator<Item = OsmNodeId>,
        T: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let tags: Vec<(String, String)> = tags
            .into_iter()
            .filter(|(k, _)| ROUTING_KEYS.contains(k))
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();

        if tags.iter().any(|(k, _)| k == "highway") {
            let refs = refs.into_iter().collect();
            self.ways.push(BufferedWay { refs, tags });
        } else {
            self.skipped += 1;
        }
    }

    /// Road ways held.
    pub fn len(&self) -> usize {
        self.ways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ways.is_empty()
    }

    /// Ways pushed without a `highway` tag.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Feed every buffered way to `builder` in push order.  Skipped ways are
    /// added to the builder's non-road count.
    pub fn replay(self, builder: &mut GraphBuilder) {
        builder.count_non_road_ways(self.skipped);
        for way in &self.ways {
            builder.on_way(&way.refs, &way.tags);
        }
    }
}
