use std::io::Read;

use crate::foundation::core::{Frame, Rgb8};
use crate::foundation::error::{PalError, PalResult};
use crate::palette::rgb565::unpack_rgb565;
use crate::rle::{decode_runs, parse_records};
use crate::stream::format::{HEADER_LEN, StreamHeader};

/// Sequential parser for a palstream byte stream.
///
/// Every record is validated before it is returned: even length, no zero runs, run total equal
/// to the frame's pixel count, and indices inside the palette.
pub struct StreamReader<R: Read> {
    inner: R,
    header: StreamHeader,
    palette: Vec<u16>,
    frames_read: u32,
    scratch: Vec<u8>,
}

impl<R: Read> StreamReader<R> {
    /// Read the header and palette table.
    pub fn new(mut inner: R) -> PalResult<Self> {
        let mut buf = [0u8; HEADER_LEN];
        read_exact_or_truncated(&mut inner, &mut buf, "header")?;
        let header = StreamHeader::from_bytes(&buf)?;

        let mut table = vec![0u8; usize::from(header.palette_len) * 2];
        read_exact_or_truncated(&mut inner, &mut table, "palette table")?;
        let palette = table
            .chunks_exact(2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .collect();

        Ok(Self {
            inner,
            header,
            palette,
            frames_read: 0,
            scratch: Vec::new(),
        })
    }

    /// Parsed header.
    pub fn header(&self) -> &StreamHeader {
        &self.header
    }

    /// Packed 5-6-5 palette, index order.
    pub fn palette_rgb565(&self) -> &[u16] {
        &self.palette
    }

    /// Frames consumed so far (read or skipped).
    pub fn frames_read(&self) -> u32 {
        self.frames_read
    }

    fn read_record(&mut self) -> PalResult<Option<usize>> {
        if self.frames_read >= self.header.frame_count {
            return Ok(None);
        }
        let frame = self.frames_read;

        let mut len_buf = [0u8; 4];
        read_exact_or_truncated(
            &mut self.inner,
            &mut len_buf,
            &format!("record length of frame {frame}"),
        )?;
        let len = u32::from_be_bytes(len_buf) as usize;

        // A valid record never needs more than one pair per pixel.
        let max_len = self.header.pixel_count() * 2;
        if len > max_len {
            return Err(PalError::malformed(
                0,
                format!("frame {frame} record length {len} exceeds maximum {max_len}"),
            ));
        }

        self.scratch.resize(len, 0);
        read_exact_or_truncated(
            &mut self.inner,
            &mut self.scratch,
            &format!("record body of frame {frame}"),
        )?;
        self.frames_read += 1;
        Ok(Some(len))
    }

    /// Skip the next frame record without decoding it. Returns `false` at end of stream.
    pub fn skip_frame(&mut self) -> PalResult<bool> {
        Ok(self.read_record()?.is_some())
    }

    /// Decode the next frame into palette indices. Returns `None` after `frame_count` frames.
    pub fn next_frame(&mut self) -> PalResult<Option<Vec<u8>>> {
        Ok(self.next_frame_with_len()?.map(|(indices, _)| indices))
    }

    /// Like [`StreamReader::next_frame`], also returning the `record_length` stored in the
    /// stream for that frame.
    pub fn next_frame_with_len(&mut self) -> PalResult<Option<(Vec<u8>, usize)>> {
        let Some(record_len) = self.read_record()? else {
            return Ok(None);
        };
        let frame = self.frames_read - 1;

        let records = parse_records(&self.scratch)?;
        let total: usize = records.iter().map(|r| usize::from(r.run)).sum();
        if total != self.header.pixel_count() {
            return Err(PalError::malformed(
                0,
                format!(
                    "frame {frame} runs cover {total} pixels, expected {}",
                    self.header.pixel_count()
                ),
            ));
        }
        if let Some((pos, rec)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.index as usize >= self.palette.len())
        {
            return Err(PalError::malformed(
                pos * 2,
                format!(
                    "frame {frame} palette index {} out of range for {} colors",
                    rec.index,
                    self.palette.len()
                ),
            ));
        }

        Ok(Some((decode_runs(&records)?, record_len)))
    }

    /// Decode the next frame and expand it to colors as a 5-6-5 display would show them.
    pub fn next_frame_rgb(&mut self) -> PalResult<Option<Frame>> {
        let Some(indices) = self.next_frame()? else {
            return Ok(None);
        };
        let pixels: Vec<Rgb8> = indices
            .iter()
            .map(|&i| unpack_rgb565(self.palette[usize::from(i)]))
            .collect();
        Frame::new(
            u32::from(self.header.width),
            u32::from(self.header.height),
            pixels,
        )
        .map(Some)
    }
}

fn read_exact_or_truncated(r: &mut impl Read, buf: &mut [u8], what: &str) -> PalResult<()> {
    r.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            PalError::truncated(format!("stream ended inside {what}"))
        } else {
            PalError::Io(e)
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/stream/reader.rs"]
mod tests;
