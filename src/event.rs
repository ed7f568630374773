use crate::volume::VolumeStats;

/// Longest message the host accepts. Rendering never exceeds this: payload
/// fields that would not fit are dropped whole from the tail.
pub const MAX_MESSAGE_LEN: usize = 512;

/// One-time event registration with the host.
pub fn registration(event_name: &str) -> String {
    clip(format!("--add event '{}'", event_name))
}

/// Per-cycle trigger carrying the current snapshot as key=value fields.
pub fn trigger(event_name: &str, stats: &VolumeStats) -> String {
    let mut msg = clip(format!("--trigger '{}'", event_name));

    let fields = [
        format!("total_space='{}GB'", stats.total_space),
        format!("free_space='{}GB'", stats.free_space),
        format!("used_space='{}GB'", stats.used_space),
        format!("percent_used='{:02}%'", stats.percent_used),
        format!("percent_remaining='{:02}%'", stats.percent_remaining),
    ];
    for field in fields {
        if msg.len() + 1 + field.len() > MAX_MESSAGE_LEN {
            break;
        }
        msg.push(' ');
        msg.push_str(&field);
    }
    msg
}

/// Hard cap for the head of a message; only reachable with an absurdly
/// long event name.
fn clip(mut s: String) -> String {
    if s.len() > MAX_MESSAGE_LEN {
        let mut end = MAX_MESSAGE_LEN;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> VolumeStats {
        VolumeStats {
            total_space:       500,
            free_space:        200,
            used_space:        300,
            percent_used:      60,
            percent_remaining: 40,
        }
    }

    #[test]
    fn registration_wire_format() {
        assert_eq!(registration("disk_event"), "--add event 'disk_event'");
    }

    #[test]
    fn trigger_wire_format() {
        assert_eq!(
            trigger("disk_event", &snapshot()),
            "--trigger 'disk_event' total_space='500GB' free_space='200GB' \
             used_space='300GB' percent_used='60%' percent_remaining='40%'"
        );
    }

    #[test]
    fn single_digit_percentages_are_zero_padded() {
        let stats = VolumeStats {
            total_space:       100,
            free_space:        95,
            used_space:        5,
            percent_used:      5,
            percent_remaining: 95,
        };
        let msg = trigger("disk_event", &stats);
        assert!(msg.contains("percent_used='05%'"));
        assert!(msg.contains("percent_remaining='95%'"));
    }

    #[test]
    fn overflowing_fields_are_dropped_whole() {
        // Head of 462 bytes leaves room for exactly two payload fields.
        let name = "x".repeat(450);
        let msg = trigger(&name, &VolumeStats::default());
        assert!(msg.len() <= MAX_MESSAGE_LEN);
        assert!(msg.contains("total_space='0GB'"));
        assert!(msg.contains("free_space='0GB'"));
        assert!(!msg.contains("used_space"));
        assert!(msg.ends_with("GB'"));
    }

    #[test]
    fn oversized_head_is_capped() {
        let name = "x".repeat(600);
        let msg = trigger(&name, &VolumeStats::default());
        assert_eq!(msg.len(), MAX_MESSAGE_LEN);
        assert!(msg.starts_with("--trigger 'x"));
    }

    #[test]
    fn full_percentage_renders_three_digits() {
        let stats = VolumeStats {
            total_space:       8,
            free_space:        0,
            used_space:        8,
            percent_used:      100,
            percent_remaining: 0,
        };
        let msg = trigger("disk_event", &stats);
        assert!(msg.contains("percent_used='100%'"));
        assert!(msg.contains("percent_remaining='00%'"));
    }
}
