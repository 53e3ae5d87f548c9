//! # Table
//!
//! The table owns the pager and the root page number. At this stage the
//! root is fixed at page 0 and is always a leaf; opening a zero-page file
//! creates it, which is the only moment a page is initialized rather than
//! read.
//!
//! Closing the table is the sole durability point. The explicit
//! [`Table::close`] propagates flush errors for the clean-exit path; `Drop`
//! repeats the close so dirty pages also reach the file when an error
//! unwinds the REPL.

use std::path::Path;

use eyre::Result;
use log::{debug, error};

use crate::btree::{LeafNode, LeafNodeMut};
use crate::storage::{PageBuf, Pager};

pub struct Table {
    pager: Pager,
    root_page_num: u32,
}

impl Table {
    /// Opens the database file, initializing an empty root leaf when the
    /// file has no pages yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut pager = Pager::open(path.as_ref())?;

        if pager.num_pages() == 0 {
            let page = pager.get_page(0)?;
            LeafNodeMut::init(page)?;
            debug!("initialized empty root leaf");
        }

        Ok(Self {
            pager,
            root_page_num: 0,
        })
    }

    pub fn root_page_num(&self) -> u32 {
        self.root_page_num
    }

    /// Cell count of the root leaf.
    pub fn root_num_cells(&mut self) -> Result<u32> {
        let root = self.root_page_num;
        let page = self.pager.get_page(root)?;
        Ok(LeafNode::from_page(page)?.num_cells())
    }

    /// Read view of the root leaf.
    pub fn root_leaf(&mut self) -> Result<LeafNode<'_>> {
        let root = self.root_page_num;
        let page = self.pager.get_page(root)?;
        LeafNode::from_page(page)
    }

    pub(crate) fn page(&mut self, page_num: u32) -> Result<&mut PageBuf> {
        self.pager.get_page(page_num)
    }

    /// Flushes every resident page and releases the buffers.
    pub fn close(&mut self) -> Result<()> {
        self.pager.close()
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        if let Err(e) = self.pager.close() {
            error!("failed to flush database file on close: {e:#}");
        }
    }
}
