//! Geometry codec: MySQL internal geometry format to WKT.
//!
//! MySQL stores spatial values as a 4-byte little-endian SRID followed by
//! standard WKB. Output is OGC well-known text, e.g. `POINT (1 2)`.

use std::fmt::Write as _;

use serde_json::Value;

use super::string::quote_sql;
use super::ColumnDef;
use crate::error::ColumnResult;
use crate::value::ColumnValue;

/// Nesting limit for geometry collections.
const MAX_DEPTH: usize = 32;

struct WkbReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WkbReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.buf.get(self.pos..self.pos + N)?;
        self.pos += N;
        bytes.try_into().ok()
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn u32(&mut self, little_endian: bool) -> Option<u32> {
        let b = self.take::<4>()?;
        Some(if little_endian {
            u32::from_le_bytes(b)
        } else {
            u32::from_be_bytes(b)
        })
    }

    fn f64(&mut self, little_endian: bool) -> Option<f64> {
        let b = self.take::<8>()?;
        Some(if little_endian {
            f64::from_le_bytes(b)
        } else {
            f64::from_be_bytes(b)
        })
    }

    /// Reads an element count, rejecting counts the buffer cannot hold.
    fn count(&mut self, little_endian: bool, min_element_size: usize) -> Option<usize> {
        let n = usize::try_from(self.u32(little_endian)?).ok()?;
        (n.checked_mul(min_element_size)? <= self.remaining()).then_some(n)
    }

    fn point(&mut self, le: bool, out: &mut String) -> Option<()> {
        let x = self.f64(le)?;
        let y = self.f64(le)?;
        write!(out, "{x} {y}").ok()
    }

    fn points(&mut self, le: bool, out: &mut String) -> Option<()> {
        let n = self.count(le, 16)?;
        if n == 0 {
            out.push_str("EMPTY");
            return Some(());
        }
        out.push('(');
        for i in 0..n {
            if i > 0 {
                out.push_str(", ");
            }
            self.point(le, out)?;
        }
        out.push(')');
        Some(())
    }

    fn rings(&mut self, le: bool, out: &mut String) -> Option<()> {
        let n = self.count(le, 4)?;
        if n == 0 {
            out.push_str("EMPTY");
            return Some(());
        }
        out.push('(');
        for i in 0..n {
            if i > 0 {
                out.push_str(", ");
            }
            self.points(le, out)?;
        }
        out.push(')');
        Some(())
    }

    /// Reads `count` nested geometries, each with its own WKB header.
    fn members(&mut self, le: bool, depth: usize, bare: bool, out: &mut String) -> Option<()> {
        let n = self.count(le, 5)?;
        if n == 0 {
            out.push_str("EMPTY");
            return Some(());
        }
        out.push('(');
        for i in 0..n {
            if i > 0 {
                out.push_str(", ");
            }
            if bare {
                // Multi* members drop their own type keyword.
                let mut member = String::new();
                self.geometry(depth + 1, &mut member)?;
                let body = member.split_once(' ').map_or(member.as_str(), |(_, b)| b);
                out.push_str(body);
            } else {
                self.geometry(depth + 1, out)?;
            }
        }
        out.push(')');
        Some(())
    }

    fn geometry(&mut self, depth: usize, out: &mut String) -> Option<()> {
        if depth > MAX_DEPTH {
            return None;
        }
        let le = match self.u8()? {
            0 => false,
            1 => true,
            _ => return None,
        };
        match self.u32(le)? {
            1 => {
                out.push_str("POINT (");
                self.point(le, out)?;
                out.push(')');
            }
            2 => {
                out.push_str("LINESTRING ");
                self.points(le, out)?;
            }
            3 => {
                out.push_str("POLYGON ");
                self.rings(le, out)?;
            }
            4 => {
                out.push_str("MULTIPOINT ");
                self.members(le, depth, true, out)?;
            }
            5 => {
                out.push_str("MULTILINESTRING ");
                self.members(le, depth, true, out)?;
            }
            6 => {
                out.push_str("MULTIPOLYGON ");
                self.members(le, depth, true, out)?;
            }
            7 => {
                out.push_str("GEOMETRYCOLLECTION ");
                self.members(le, depth, false, out)?;
            }
            _ => return None,
        }
        Some(())
    }
}

/// Converts MySQL internal geometry bytes into `(srid, wkt)`.
fn decode(bytes: &[u8]) -> Option<(u32, String)> {
    let (srid, wkb) = bytes.split_first_chunk::<4>()?;
    let mut reader = WkbReader::new(wkb);
    let mut wkt = String::new();
    reader.geometry(0, &mut wkt)?;
    (reader.remaining() == 0).then_some((u32::from_le_bytes(*srid), wkt))
}

fn geometry_value(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<(u32, String)> {
    match value {
        ColumnValue::Bytes(b) => decode(b).ok_or_else(|| col.cast_error(value)),
        ColumnValue::String(wkt) => Ok((0, wkt.clone())),
        _ => Err(col.cast_error(value)),
    }
}

pub(super) fn geometry_sql(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<String> {
    let (srid, wkt) = geometry_value(col, value)?;
    if srid == 0 {
        Ok(format!("ST_GeomFromText({})", quote_sql(&wkt)))
    } else {
        Ok(format!("ST_GeomFromText({}, {srid})", quote_sql(&wkt)))
    }
}

pub(super) fn geometry_json(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<Value> {
    geometry_value(col, value).map(|(_, wkt)| Value::String(wkt))
}
