use chrono_tz::Tz;

use crate::core::{
    error::AvailabilityResult,
    models::{AvailabilityResponse, GenerateAvailabilityRequest, Granularity, OutputMode, ZonedSlot},
    render,
    validation::Validate,
};

/// Availability text generator.
///
/// Holds no state; every call is independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityProvider;

impl AvailabilityProvider {
    pub fn new() -> Self {
        Self
    }

    /// Validate a request and render its slots in the requested layout
    pub fn generate(
        &self,
        request: &GenerateAvailabilityRequest,
    ) -> AvailabilityResult<AvailabilityResponse> {
        tracing::debug!(
            slots = request.selected_slots.len(),
            output_format = %request.output_format,
            "Generating availability text"
        );

        let validated = request.validate()?;
        let text_output = self.render(
            &validated.slots,
            validated.user_tz,
            validated.recipient_tz,
            validated.mode,
            validated.granularity,
        );

        tracing::info!(
            slots = validated.slots.len(),
            mode = %validated.mode,
            user_timezone = %validated.user_tz,
            "Availability text generated"
        );

        Ok(AvailabilityResponse {
            text_output,
            user_timezone: request.user_timezone.clone(),
            recipient_timezone: request.recipient_timezone.clone(),
        })
    }

    /// Render already tagged slots without request validation
    pub fn render(
        &self,
        slots: &[ZonedSlot],
        user_tz: Tz,
        recipient_tz: Option<Tz>,
        mode: OutputMode,
        granularity: Granularity,
    ) -> String {
        match mode {
            OutputMode::Continuous => render::render_continuous(slots, user_tz, recipient_tz),
            OutputMode::Chunks => render::render_chunks(slots, user_tz, recipient_tz, granularity),
        }
    }
}
