//! Booking business logic - pricing, seat availability, promo codes, booking
//! references and booking confirmation e-mails.
//!
//! Every function validates its own inputs and either computes a result directly or
//! delegates to the collaborator it is handed. None of them call each other.

use crate::{
    core::{
        ports::{EmailMessage, Mailer, PromoSource, SeatSource},
        validation::{require_email, require_non_negative, require_positive_id, round_cents},
    },
    errors::{Error, Result},
};
use rand::Rng;
use tracing::{debug, info, warn};

/// Symbols a booking reference suffix is drawn from.
const REF_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Number of random symbols at the end of a booking reference.
pub const REF_SUFFIX_LEN: usize = 6;

/// Details of a confirmed booking, rendered into the confirmation e-mail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDetails {
    /// Booking reference, e.g. `BOOK-42-99-X7K2QD`
    pub reference: String,
    /// Name of the booked event
    pub event_name: String,
    /// Number of seats booked
    pub seats: i64,
    /// Total price paid
    pub total: f64,
}

/// Calculates the total price for `count` tickets after a percentage discount.
///
/// The result is `base_price * (1 - discount_percent / 100) * count`, rounded to cents
/// with ties to even.
///
/// # Errors
/// Returns `InvalidArgument` if the price or count is negative, the discount is
/// outside `0..=100`, or any amount is not finite.
pub fn calc_price(base_price: f64, discount_percent: f64, count: i64) -> Result<f64> {
    if count < 0 {
        return Err(Error::invalid("Invalid ticket count or price"));
    }
    require_non_negative(base_price, "Invalid ticket count or price")?;
    if !(0.0..=100.0).contains(&discount_percent) {
        return Err(Error::invalid("Discount must be between 0 and 100%"));
    }

    #[allow(clippy::cast_precision_loss)]
    let total = base_price * (1.0 - discount_percent / 100.0) * count as f64;
    round_cents(total)
}

/// Checks whether `event_id` still has at least `seats_requested` seats.
///
/// The seat source is only consulted once the request itself is valid.
pub async fn check_availability<S>(seats: &S, event_id: i64, seats_requested: i64) -> Result<bool>
where
    S: SeatSource + ?Sized,
{
    if seats_requested <= 0 {
        return Err(Error::invalid("Invalid number of seats requested"));
    }

    let available = seats.available_seats(event_id).await?;
    debug!(event_id, seats_requested, available, "Checked seat availability");
    Ok(seats_requested <= available)
}

/// Applies a promo code to an order, consuming one use of the code.
///
/// Returns `Ok(false)` without touching the code when it is unknown, expired or has
/// no uses left.
///
/// # Errors
/// Returns `InvalidArgument` for an empty code; lookup and update failures from the
/// promo source are propagated.
pub async fn apply_promo_code<P>(promos: &P, order_id: i64, code: &str) -> Result<bool>
where
    P: PromoSource + ?Sized,
{
    if code.trim().is_empty() {
        return Err(Error::invalid("Promo code cannot be empty"));
    }

    let Some(promo) = promos.find(code).await? else {
        debug!(order_id, code, "Promo code not found");
        return Ok(false);
    };

    if !promo.is_applicable() {
        debug!(
            order_id,
            code,
            is_expired = promo.is_expired,
            usage_left = promo.usage_left,
            "Promo code not applicable"
        );
        return Ok(false);
    }

    if !promos.mark_used(code).await? {
        debug!(order_id, code, "Promo code used up by another order");
        return Ok(false);
    }
    info!(order_id, code, "Promo code applied");
    Ok(true)
}

/// Generates a booking reference of the form `BOOK-{user_id}-{event_id}-{SUFFIX}`.
///
/// The suffix is six symbols from `A-Z0-9`, so two references for the same user and
/// event collide with probability about 1 in 2.2 billion.
pub fn generate_booking_ref(user_id: i64, event_id: i64) -> Result<String> {
    require_positive_id(user_id, "Invalid user ID")?;
    require_positive_id(event_id, "Invalid event ID")?;

    let mut rng = rand::rng();
    let suffix: String = (0..REF_SUFFIX_LEN)
        .map(|_| char::from(REF_ALPHABET[rng.random_range(0..REF_ALPHABET.len())]))
        .collect();

    Ok(format!("BOOK-{user_id}-{event_id}-{suffix}"))
}

/// Sends a booking confirmation e-mail.
///
/// Returns `Ok(false)` instead of an error when the transport fails.
///
/// # Errors
/// Returns `InvalidArgument` if `email` has no `@`.
pub async fn send_notification_email<M>(
    mailer: &M,
    email: &str,
    details: &BookingDetails,
) -> Result<bool>
where
    M: Mailer + ?Sized,
{
    require_email(email, "Invalid email")?;

    let message = booking_message(details);
    match mailer.send(email, &message).await {
        Ok(()) => {
            info!(email, reference = %details.reference, "Booking confirmation sent");
            Ok(true)
        }
        Err(e) => {
            warn!(email, error = %e, "Failed to send booking confirmation");
            Ok(false)
        }
    }
}

fn booking_message(details: &BookingDetails) -> EmailMessage {
    let subject = if details.reference.is_empty() {
        "Your booking".to_string()
    } else {
        format!("Your booking {}", details.reference)
    };

    let body = format!(
        "Event: {}\nSeats: {}\nTotal: {:.2}\nReference: {}\n",
        details.event_name, details.seats, details.total, details.reference
    );

    EmailMessage { subject, body }
}
