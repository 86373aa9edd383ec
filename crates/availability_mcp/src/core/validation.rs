use chrono_tz::Tz;

use crate::core::{
    error::{AvailabilityError, AvailabilityResult},
    models::{GenerateAvailabilityRequest, Granularity, OutputMode, SlotRequest, ZonedSlot},
    normalize::{normalize_in, parse_timezone},
    timestamp::Timestamp,
};

/// Input that must be checked before it reaches the renderers
pub trait Validate {
    type Output;

    fn validate(&self) -> AvailabilityResult<Self::Output>;
}

/// A request that passed validation, with every value parsed
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub user_tz: Tz,
    pub recipient_tz: Option<Tz>,
    pub mode: OutputMode,
    pub granularity: Granularity,
    /// Slots tagged with their source zone, in input order
    pub slots: Vec<ZonedSlot>,
}

impl Validate for GenerateAvailabilityRequest {
    type Output = ValidatedRequest;

    fn validate(&self) -> AvailabilityResult<ValidatedRequest> {
        let user_tz = parse_timezone(&self.user_timezone)?;
        let recipient_tz = self
            .recipient_timezone
            .as_deref()
            .map(parse_timezone)
            .transpose()?;
        let mode: OutputMode = self.output_format.parse()?;
        let granularity = Granularity::try_from(self.slot_granularity_minutes)?;

        let slots = self
            .selected_slots
            .iter()
            .enumerate()
            .map(|(index, slot)| tag_slot(index, slot, user_tz))
            .collect::<AvailabilityResult<Vec<_>>>()?;

        Ok(ValidatedRequest {
            user_tz,
            recipient_tz,
            mode,
            granularity,
            slots,
        })
    }
}

/// Attach a source zone to both boundaries and check their order.
///
/// Naive values take the slot's own zone if given, the user's zone otherwise.
fn tag_slot(index: usize, slot: &SlotRequest, user_tz: Tz) -> AvailabilityResult<ZonedSlot> {
    let start: Timestamp = slot.start.parse()?;
    let end: Timestamp = slot.end.parse()?;
    let source = match slot.timezone.as_deref() {
        Some(name) => parse_timezone(name)?,
        None => user_tz,
    };

    if start.is_naive() || end.is_naive() {
        tracing::debug!(index, source = %source, "Reading naive slot boundaries");
    }

    let start = normalize_in(&start, source)?;
    let end = normalize_in(&end, source)?;
    if start >= end {
        return Err(AvailabilityError::InvalidSlotOrdering { index });
    }

    Ok(ZonedSlot::new(start, end))
}
