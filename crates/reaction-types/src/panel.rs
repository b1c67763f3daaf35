//! Panel state and the press transform
//!
//! A [`Panel`] is the decoded form of one button row. It is rebuilt from the
//! message on every press, changed in memory, and rendered back into a full
//! replacement row.

use crate::codec::{ButtonPayload, PayloadFormat};
use crate::errors::PanelError;
use crate::policies::PressPolicy;
use crate::reaction::{Reaction, REACTIONS};

/// Result of a press for the pressing user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The user now has the pressed reaction
    Added,
    /// The user no longer has the pressed reaction
    Removed,
}

/// One button ready to be handed to the chat platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedButton {
    pub caption: String,
    pub data: String,
}

/// Voter sets for every reaction, indexed by [`Reaction::position`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    voters: [Vec<i64>; REACTIONS.len()],
}

impl Panel {
    /// A panel nobody has reacted to
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a panel from decoded payloads; each reaction must appear exactly once
    pub fn from_payloads<I>(payloads: I) -> Result<Self, PanelError>
    where
        I: IntoIterator<Item = ButtonPayload>,
    {
        let mut seen = [false; REACTIONS.len()];
        let mut panel = Self::new();

        for payload in payloads {
            let slot = payload.reaction.position();
            if seen[slot] {
                return Err(PanelError::DuplicateReaction(payload.reaction));
            }
            seen[slot] = true;
            panel.voters[slot] = payload.users;
        }

        if let Some(missing) = REACTIONS.iter().find(|r| !seen[r.position()]) {
            return Err(PanelError::MissingReaction(*missing));
        }

        Ok(panel)
    }

    /// Decode a row of callback data strings
    pub fn decode_row<F, S>(format: &F, row: &[S]) -> Result<Self, PanelError>
    where
        F: PayloadFormat + ?Sized,
        S: AsRef<str>,
    {
        if row.is_empty() {
            return Err(PanelError::MissingRow);
        }

        let payloads = row
            .iter()
            .enumerate()
            .map(|(index, data)| {
                format
                    .decode(data.as_ref())
                    .map_err(|source| PanelError::Button { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_payloads(payloads)
    }

    /// Decode the first row of a keyboard, if the message has one
    pub fn decode_keyboard<F>(format: &F, keyboard: Option<&[Vec<String>]>) -> Result<Self, PanelError>
    where
        F: PayloadFormat + ?Sized,
    {
        let row = keyboard
            .and_then(|rows| rows.first())
            .ok_or(PanelError::MissingRow)?;
        Self::decode_row(format, row)
    }

    /// Users who currently have `reaction`
    pub fn voters(&self, reaction: Reaction) -> &[i64] {
        &self.voters[reaction.position()]
    }

    pub fn has_voted(&self, reaction: Reaction, user_id: i64) -> bool {
        self.voters(reaction).contains(&user_id)
    }

    /// True when nobody has reacted at all
    pub fn is_untouched(&self) -> bool {
        self.voters.iter().all(Vec::is_empty)
    }

    /// Reactions with at least one voter, in table order
    pub fn reacted(&self) -> impl Iterator<Item = (Reaction, &[i64])> + '_ {
        REACTIONS
            .iter()
            .map(move |r| (*r, self.voters(*r)))
            .filter(|(_, users)| !users.is_empty())
    }

    /// Apply a press by `user_id` on `reaction`.
    ///
    /// The pressed reaction is toggled for the user. Under
    /// [`PressPolicy::Exclusive`] the user is also dropped from every other
    /// reaction.
    pub fn press(&mut self, user_id: i64, reaction: Reaction, policy: PressPolicy) -> PressOutcome {
        if policy == PressPolicy::Exclusive {
            for other in REACTIONS.iter().filter(|r| **r != reaction) {
                self.voters[other.position()].retain(|id| *id != user_id);
            }
        }

        let users = &mut self.voters[reaction.position()];
        match users.iter().position(|id| *id == user_id) {
            Some(index) => {
                users.remove(index);
                PressOutcome::Removed
            }
            None => {
                users.push(user_id);
                PressOutcome::Added
            }
        }
    }

    /// Payloads for every button, in table order
    pub fn payloads(&self) -> Vec<ButtonPayload> {
        REACTIONS
            .iter()
            .map(|r| ButtonPayload::new(*r, self.voters(*r).to_vec()))
            .collect()
    }

    /// The full replacement row
    pub fn render<F>(&self, format: &F) -> Vec<RenderedButton>
    where
        F: PayloadFormat + ?Sized,
    {
        self.payloads()
            .into_iter()
            .map(|payload| RenderedButton {
                caption: caption(payload.reaction, payload.users.len()),
                data: format.encode(&payload),
            })
            .collect()
    }
}

/// Button text: the bare emoji, or the emoji and the count once someone reacted
pub fn caption(reaction: Reaction, count: usize) -> String {
    if count == 0 {
        reaction.emoji().to_string()
    } else {
        format!("{} {}", reaction.emoji(), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CompactFormat, JsonFormat};
    use crate::errors::DecodeError;

    fn panel_with(reaction: Reaction, users: &[i64]) -> Panel {
        let mut panel = Panel::new();
        for user in users {
            panel.press(*user, reaction, PressPolicy::Independent);
        }
        panel
    }

    // ── Captions ──────────────────────────────────────────────────────────────

    #[test]
    fn test_caption_bare_when_empty() {
        assert_eq!(caption(Reaction::Heart, 0), "❤");
    }

    #[test]
    fn test_caption_with_count() {
        assert_eq!(caption(Reaction::Approve, 1), "👍 1");
        assert_eq!(caption(Reaction::Sad, 12), "😢 12");
    }

    // ── Press ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_press_adds_then_removes() {
        let mut panel = Panel::new();
        assert_eq!(panel.press(42, Reaction::Approve, PressPolicy::Exclusive), PressOutcome::Added);
        assert_eq!(panel.voters(Reaction::Approve), &[42]);
        assert_eq!(panel.press(42, Reaction::Approve, PressPolicy::Exclusive), PressOutcome::Removed);
        assert!(panel.is_untouched());
    }

    #[test]
    fn test_double_press_restores_existing_membership() {
        let original = panel_with(Reaction::Laugh, &[1, 42, 3]);

        for policy in [PressPolicy::Exclusive, PressPolicy::Independent] {
            let mut panel = original.clone();
            panel.press(42, Reaction::Laugh, policy);
            panel.press(42, Reaction::Laugh, policy);
            assert!(panel.has_voted(Reaction::Laugh, 42));
            assert_eq!(panel.voters(Reaction::Laugh).len(), 3);
        }
    }

    #[test]
    fn test_exclusive_press_moves_vote() {
        let mut panel = panel_with(Reaction::Approve, &[42, 7]);
        panel.press(42, Reaction::Laugh, PressPolicy::Exclusive);

        assert_eq!(panel.voters(Reaction::Approve), &[7]);
        assert_eq!(panel.voters(Reaction::Laugh), &[42]);
    }

    #[test]
    fn test_independent_press_keeps_other_votes() {
        let mut panel = panel_with(Reaction::Approve, &[42]);
        panel.press(42, Reaction::Laugh, PressPolicy::Independent);

        assert_eq!(panel.voters(Reaction::Approve), &[42]);
        assert_eq!(panel.voters(Reaction::Laugh), &[42]);
    }

    #[test]
    fn test_press_preserves_voter_order() {
        let mut panel = panel_with(Reaction::Heart, &[5, 3, 9]);
        panel.press(3, Reaction::Heart, PressPolicy::Exclusive);
        panel.press(1, Reaction::Heart, PressPolicy::Exclusive);
        assert_eq!(panel.voters(Reaction::Heart), &[5, 9, 1]);
    }

    // ── Decoding rows ─────────────────────────────────────────────────────────

    #[test]
    fn test_decode_row_accepts_any_button_order() {
        let mut row: Vec<String> = Panel::new()
            .render(&JsonFormat)
            .into_iter()
            .map(|b| b.data)
            .collect();
        row.reverse();

        assert_eq!(Panel::decode_row(&JsonFormat, &row).unwrap(), Panel::new());
    }

    #[test]
    fn test_decode_row_reports_failing_button() {
        let mut row: Vec<String> = Panel::new()
            .render(&CompactFormat)
            .into_iter()
            .map(|b| b.data)
            .collect();
        row[2] = "disapprove:oops".to_string();

        let err = Panel::decode_row(&CompactFormat, &row).unwrap_err();
        assert_eq!(
            err,
            PanelError::Button {
                index: 2,
                source: DecodeError::InvalidUserId("oops".into()),
            }
        );
    }

    #[test]
    fn test_decode_row_requires_every_reaction_once() {
        let payloads = Panel::new().payloads();

        let missing = Panel::from_payloads(payloads[1..].to_vec()).unwrap_err();
        assert_eq!(missing, PanelError::MissingReaction(Reaction::Heart));

        let mut doubled = payloads.clone();
        doubled.push(ButtonPayload::empty(Reaction::Sad));
        let duplicate = Panel::from_payloads(doubled).unwrap_err();
        assert_eq!(duplicate, PanelError::DuplicateReaction(Reaction::Sad));
    }

    #[test]
    fn test_decode_keyboard_without_rows() {
        assert_eq!(
            Panel::decode_keyboard(&JsonFormat, None).unwrap_err(),
            PanelError::MissingRow
        );
        assert_eq!(
            Panel::decode_keyboard(&JsonFormat, Some(&[][..])).unwrap_err(),
            PanelError::MissingRow
        );
        let empty_row: Vec<Vec<String>> = vec![vec![]];
        assert_eq!(
            Panel::decode_keyboard(&JsonFormat, Some(empty_row.as_slice())).unwrap_err(),
            PanelError::MissingRow
        );
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_render_in_table_order() {
        let panel = panel_with(Reaction::Anger, &[8, 9]);
        let buttons = panel.render(&JsonFormat);

        let captions: Vec<_> = buttons.iter().map(|b| b.caption.as_str()).collect();
        assert_eq!(captions, vec!["❤", "👍", "👎", "😂", "😠 2", "😢"]);
        assert_eq!(buttons[4].data, r#"{"reaction":"anger","users":[8,9]}"#);
    }

    #[test]
    fn test_reacted_skips_empty_reactions() {
        let mut panel = panel_with(Reaction::Sad, &[1]);
        panel.press(2, Reaction::Heart, PressPolicy::Exclusive);

        let reacted: Vec<_> = panel.reacted().map(|(r, users)| (r, users.to_vec())).collect();
        assert_eq!(reacted, vec![(Reaction::Heart, vec![2]), (Reaction::Sad, vec![1])]);
    }
}
