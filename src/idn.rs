//! Parsing and wire encoding of SIP parameter identifiers.
//!
//! An IDN names one data element on a drive, written
//! `<class>-<block>-<number>` with an optional `.<SI>.<SE>` suffix selecting
//! a structure instance and element. On the wire it is a fixed four byte
//! field: the little-endian 16-bit identifier word followed by the element
//! and instance bytes.

use bitfields::bitfield;
use serde::{Deserialize, Serialize};

use crate::data::{self, ByteError};

/// Size of the encoded IDN field in a request frame.
pub const IDN_LEN: usize = 4;

const BLOCK_MAX: u8 = 7;
const NUMBER_MAX: u16 = 4095;

/// Widest `number` token the grammar admits.
const NUMBER_DIGITS: usize = 4;
/// Widest SI/SE token the grammar admits.
const SUB_DIGITS: usize = 3;

/// Parameter class, the top bit of the identifier word.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Class {
    /// Standardized parameter (`S`).
    #[default]
    Standard,
    /// Product or manufacturer specific parameter (`P`).
    Product,
}

impl Class {
    const fn from_bits(value: u8) -> Self {
        match value {
            0 => Class::Standard,
            _ => Class::Product,
        }
    }

    const fn into_bits(self) -> u8 {
        self as u8
    }

    const fn letter(self) -> char {
        match self {
            Class::Standard => 'S',
            Class::Product => 'P',
        }
    }
}

/// The 16-bit identifier word. Splitting it little-endian yields wire
/// bytes 0 and 1, with the class flag landing in the top bit of byte 1.
#[bitfield(u16)]
struct Ident {
    #[bits(12)]
    number: u16,
    #[bits(3)]
    block: u8,
    #[bits(1)]
    class: Class,
}

/// Names the address field an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Block,
    Number,
    StructureInstance,
    StructureElement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Dash/dot token structure does not match the IDN grammar.
    Structure,
    /// Class letter is neither `S` nor `P`.
    Class,
    /// A field is empty, non-decimal or wider than the grammar allows.
    Malformed(Field),
    /// A field parses but exceeds its domain bound.
    OutOfRange(Field),
}

/// A validated parameter identifier.
///
/// Only constructed through [`Idn::new`], [`Idn::parse`] or
/// [`Idn::from_bytes`], so block and number are always within their bit
/// fields and the identifier word can never overflow 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Idn {
    class: Class,
    block: u8,
    number: u16,
    instance: u8,
    element: u8,
}

impl Idn {
    pub fn new(
        class: Class,
        block: u8,
        number: u16,
        instance: u8,
        element: u8,
    ) -> Result<Self, Error> {
        if block > BLOCK_MAX {
            return Err(Error::OutOfRange(Field::Block));
        }
        if number > NUMBER_MAX {
            return Err(Error::OutOfRange(Field::Number));
        }

        Ok(Self {
            class,
            block,
            number,
            instance,
            element,
        })
    }

    /// Parses the textual form, e.g. `S-0-0001.255.128`.
    ///
    /// The SI/SE suffix may be omitted entirely (`S-0-0001` addresses the
    /// parameter itself, SI = SE = 0), but a single-dot form is rejected.
    pub fn parse(text: &str) -> Result<Self, Error> {
        trace!("parsing idn {}", text);

        let mut dashes = text.split('-');
        let (Some(class), Some(block), Some(tail), None) =
            (dashes.next(), dashes.next(), dashes.next(), dashes.next())
        else {
            return Err(Error::Structure);
        };

        let class = match class {
            "S" => Class::Standard,
            "P" => Class::Product,
            _ => return Err(Error::Class),
        };

        let mut dots = tail.split('.');
        let (number, sub) = match (dots.next(), dots.next(), dots.next(), dots.next()) {
            (Some(number), None, _, _) => (number, None),
            (Some(number), Some(si), Some(se), None) => (number, Some((si, se))),
            _ => return Err(Error::Structure),
        };

        let block = parse_field(block, usize::MAX, u32::from(BLOCK_MAX), Field::Block)? as u8;
        let number =
            parse_field(number, NUMBER_DIGITS, u32::from(NUMBER_MAX), Field::Number)? as u16;

        let (instance, element) = match sub {
            Some((si, se)) => (
                parse_sub_field(si, Field::StructureInstance)?,
                parse_sub_field(se, Field::StructureElement)?,
            ),
            None => (0, 0),
        };

        Ok(Self {
            class,
            block,
            number,
            instance,
            element,
        })
    }

    /// Encodes into the four byte wire form.
    ///
    /// Note(order): the element byte precedes the instance byte. This is the
    /// protocol's wire contract, not a mistake.
    pub fn to_bytes(&self) -> [u8; IDN_LEN] {
        let ident = IdentBuilder::new()
            .with_number(self.number)
            .with_block(self.block)
            .with_class(self.class)
            .build();
        let [low, high] = ident.into_bits().to_le_bytes();

        [low, high, self.element, self.instance]
    }

    /// Decodes the four byte wire form. Infallible: every bit pattern
    /// decomposes into in-range fields.
    pub fn from_bytes(bytes: [u8; IDN_LEN]) -> Self {
        let ident = Ident::from_bits(u16::from_le_bytes([bytes[0], bytes[1]]));

        Self {
            class: ident.class(),
            block: ident.block(),
            number: ident.number(),
            element: bytes[2],
            instance: bytes[3],
        }
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn block(&self) -> u8 {
        self.block
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    /// Structure instance (SI).
    pub fn instance(&self) -> u8 {
        self.instance
    }

    /// Structure element (SE).
    pub fn element(&self) -> u8 {
        self.element
    }
}

impl core::str::FromStr for Idn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for Idn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}-{}-{:04}.{}.{}",
            self.class.letter(),
            self.block,
            self.number,
            self.instance,
            self.element
        )
    }
}

fn parse_field(text: &str, max_digits: usize, max: u32, field: Field) -> Result<u32, Error> {
    if text.is_empty() || text.len() > max_digits {
        return Err(Error::Malformed(field));
    }

    let value = data::decimal(text).ok_or(Error::Malformed(field))?;
    if value > max {
        return Err(Error::OutOfRange(field));
    }
    Ok(value)
}

/// SI/SE fields go through the unsigned byte normalizer; the signed result
/// carries the same bits the wire wants.
fn parse_sub_field(text: &str, field: Field) -> Result<u8, Error> {
    if text.len() > SUB_DIGITS {
        return Err(Error::Malformed(field));
    }

    match data::parse_unsigned_byte(text) {
        Ok(value) => Ok(value as u8),
        Err(ByteError::Malformed) => Err(Error::Malformed(field)),
        Err(ByteError::OutOfRange) => Err(Error::OutOfRange(field)),
    }
}
