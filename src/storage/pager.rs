//! # Pager
//!
//! Owns the database file and up to [`TABLE_MAX_PAGES`] resident page
//! buffers. Pages are loaded lazily: addressing a page that exists on disk
//! reads it into a fresh buffer; addressing a page past the on-disk extent
//! yields a zeroed buffer and grows the logical page count so the page is
//! written out on close.
//!
//! A database file whose length is not a whole number of pages was torn by
//! something outside this program and is rejected at open.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use eyre::{bail, ensure, Result, WrapErr};
use log::{debug, trace};

use crate::config::{PAGE_SIZE, TABLE_MAX_PAGES};

pub type PageBuf = [u8; PAGE_SIZE];

#[derive(Debug)]
pub struct Pager {
    file: File,
    /// Pages the file held when it was opened (or last closed). Reads only
    /// make sense inside this extent; beyond it the file has no bytes yet.
    pages_on_disk: u32,
    /// Logical page count: on-disk pages plus pages created in memory.
    num_pages: u32,
    pages: [Option<Box<PageBuf>>; TABLE_MAX_PAGES],
}

impl Pager {
    /// Opens (creating if absent, owner read+write only) the database file
    /// and validates its length.
    pub fn open(path: &Path) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let file = options
            .open(path)
            .wrap_err_with(|| format!("failed to open database file {}", path.display()))?;

        let file_length = file
            .metadata()
            .wrap_err("failed to stat database file")?
            .len();
        ensure!(
            file_length % PAGE_SIZE as u64 == 0,
            "Db file is not a whole number of pages. Corrupt file."
        );

        let num_pages = (file_length / PAGE_SIZE as u64) as u32;
        debug!("opened {} ({} pages on disk)", path.display(), num_pages);

        Ok(Self {
            file,
            pages_on_disk: num_pages,
            num_pages,
            pages: std::array::from_fn(|_| None),
        })
    }

    /// Number of pages the table currently spans, resident or not.
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Returns the buffer for `page_num`, loading or creating it on first
    /// access. Addressing past the on-disk extent extends the logical page
    /// count so the new page is flushed on close.
    pub fn get_page(&mut self, page_num: u32) -> Result<&mut PageBuf> {
        ensure!(
            (page_num as usize) < TABLE_MAX_PAGES,
            "page number {} out of bounds (max {})",
            page_num,
            TABLE_MAX_PAGES
        );

        let slot = page_num as usize;
        if self.pages[slot].is_none() {
            let mut page: Box<PageBuf> = Box::new([0u8; PAGE_SIZE]);
            if page_num < self.pages_on_disk {
                read_page(&mut self.file, page_num, &mut page)?;
            }
            if page_num >= self.num_pages {
                self.num_pages = page_num + 1;
            }
            self.pages[slot] = Some(page);
        }

        match self.pages[slot].as_deref_mut() {
            Some(page) => Ok(page),
            None => bail!("page slot {} empty after load", page_num),
        }
    }

    /// Writes the resident buffer for `page_num` back to the file.
    pub fn flush(&mut self, page_num: u32) -> Result<()> {
        let Some(page) = self.pages.get(page_num as usize).and_then(|p| p.as_deref()) else {
            bail!("tried to flush page {} with no resident buffer", page_num);
        };

        self.file
            .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))
            .wrap_err_with(|| format!("failed to seek to page {page_num}"))?;
        self.file
            .write_all(page)
            .wrap_err_with(|| format!("failed to write page {page_num}"))?;
        trace!("flushed page {page_num}");
        Ok(())
    }

    /// Flushes every resident page in `[0, num_pages)` and releases the
    /// buffers. Safe to call more than once; a second call finds nothing
    /// resident and does no I/O.
    pub fn close(&mut self) -> Result<()> {
        for page_num in 0..self.num_pages {
            if self.pages[page_num as usize].is_some() {
                self.flush(page_num)?;
                self.pages[page_num as usize] = None;
            }
        }
        self.pages_on_disk = self.pages_on_disk.max(self.num_pages);
        debug!("closed database file ({} pages)", self.num_pages);
        Ok(())
    }
}

fn read_page(file: &mut File, page_num: u32, buf: &mut PageBuf) -> Result<()> {
    file.seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))
        .wrap_err_with(|| format!("failed to seek to page {page_num}"))?;

    // A short read past the end of the file leaves the tail zeroed.
    let mut filled = 0;
    while filled < PAGE_SIZE {
        let n = file
            .read(&mut buf[filled..])
            .wrap_err_with(|| format!("failed to read page {page_num}"))?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    trace!("loaded page {page_num} ({filled} bytes from disk)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_creates_a_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fresh.db");

        let pager = Pager::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(pager.num_pages(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn fresh_files_are_not_group_or_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("private.db");

        Pager::open(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn open_rejects_a_torn_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("torn.db");
        std::fs::write(&path, vec![0u8; PAGE_SIZE + 1]).unwrap();

        let err = Pager::open(&path).unwrap_err();

        assert!(err.to_string().contains("Corrupt file"));
    }

    #[test]
    fn addressing_past_the_extent_grows_the_page_count() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(&dir.path().join("grow.db")).unwrap();

        pager.get_page(0).unwrap();

        assert_eq!(pager.num_pages(), 1);
    }

    #[test]
    fn page_number_at_the_slot_limit_is_rejected() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(&dir.path().join("limit.db")).unwrap();

        let err = pager.get_page(TABLE_MAX_PAGES as u32).unwrap_err();

        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn flush_without_a_resident_buffer_is_an_error() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(&dir.path().join("noflush.db")).unwrap();

        assert!(pager.flush(0).is_err());
    }

    #[test]
    fn close_persists_resident_pages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("persist.db");

        {
            let mut pager = Pager::open(&path).unwrap();
            let page = pager.get_page(0).unwrap();
            page[0] = 0xAB;
            page[PAGE_SIZE - 1] = 0xCD;
            pager.close().unwrap();
        }

        assert_eq!(std::fs::metadata(&path).unwrap().len(), PAGE_SIZE as u64);

        let mut pager = Pager::open(&path).unwrap();
        let page = pager.get_page(0).unwrap();
        assert_eq!(page[0], 0xAB);
        assert_eq!(page[PAGE_SIZE - 1], 0xCD);
    }

    #[test]
    fn close_twice_is_harmless() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(&dir.path().join("twice.db")).unwrap();
        pager.get_page(0).unwrap();

        pager.close().unwrap();
        pager.close().unwrap();
    }

    #[test]
    fn pages_written_past_a_gap_leave_zeroed_pages_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gap.db");

        {
            let mut pager = Pager::open(&path).unwrap();
            let page = pager.get_page(2).unwrap();
            page[0] = 0x11;
            pager.close().unwrap();
        }

        let len = std::fs::metadata(&path).unwrap().len();
        assert_eq!(len, 3 * PAGE_SIZE as u64);
        assert_eq!(len % PAGE_SIZE as u64, 0);
    }
}
