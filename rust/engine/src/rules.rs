use crate::action::{Action, ActionKind};
use crate::errors::GameError;

/// An action after legality checks and stack clamping, carrying the exact
/// number of chips it moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            ValidatedAction::Fold => ActionKind::Fold,
            ValidatedAction::Check => ActionKind::Check,
            ValidatedAction::Call(_) => ActionKind::Call,
            ValidatedAction::Bet(_) => ActionKind::Bet,
            ValidatedAction::Raise(_) => ActionKind::Raise,
            ValidatedAction::AllIn(_) => ActionKind::AllIn,
        }
    }

    /// Chips moved from the stack into the pot.
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(c)
            | ValidatedAction::Bet(c)
            | ValidatedAction::Raise(c)
            | ValidatedAction::AllIn(c) => c,
        }
    }
}

/// The four numbers legal-action derivation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingContext {
    /// Street-high commitment
    pub current_bet: u32,
    /// What the acting player has committed this street
    pub player_bet: u32,
    pub stack: u32,
    pub min_raise: u32,
}

impl BettingContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.player_bet)
    }

    /// Legal action kinds, in FOLD, CHECK, CALL/ALL_IN, BET/RAISE/ALL_IN order.
    ///
    /// Whenever a CALL, BET or RAISE would need the whole stack, ALL_IN is
    /// offered in its place, so the kind chosen always matches the chips moved.
    ///
    /// ```
    /// use tablestakes_engine::action::ActionKind as K;
    /// use tablestakes_engine::rules::BettingContext;
    ///
    /// // facing a bet of 10 with 1000 behind
    /// let ctx = BettingContext { current_bet: 10, player_bet: 0, stack: 1000, min_raise: 10 };
    /// assert_eq!(ctx.valid_actions(), vec![K::Fold, K::Call, K::Raise]);
    ///
    /// // the call would take the whole stack
    /// let ctx = BettingContext { current_bet: 100, player_bet: 0, stack: 60, min_raise: 10 };
    /// assert_eq!(ctx.valid_actions(), vec![K::Fold, K::AllIn]);
    /// ```
    pub fn valid_actions(&self) -> Vec<ActionKind> {
        let mut valid = Vec::with_capacity(3);
        let to_call = self.to_call();
        let mut push = |k: ActionKind| {
            if !valid.contains(&k) {
                valid.push(k);
            }
        };

        if to_call > 0 {
            push(ActionKind::Fold);
        } else {
            push(ActionKind::Check);
        }

        if to_call > 0 && self.stack > 0 {
            if to_call >= self.stack {
                push(ActionKind::AllIn);
            } else {
                push(ActionKind::Call);
            }
        }

        if self.current_bet == 0 && self.stack > 0 {
            if self.stack <= self.min_raise {
                push(ActionKind::AllIn);
            } else {
                push(ActionKind::Bet);
            }
        }

        if self.current_bet > 0 && self.stack > to_call {
            if self.stack <= to_call.saturating_add(self.min_raise) {
                push(ActionKind::AllIn);
            } else {
                push(ActionKind::Raise);
            }
        }

        valid
    }
}

/// Checks `action` against the legal set for `ctx` and resolves the exact chips it moves.
///
/// BET and RAISE amounts below the legal minimum are lifted to it; any amount
/// that reaches the stack becomes ALL_IN for the full stack.
///
/// # Errors
///
/// [`GameError::IllegalAction`] when the kind is not in [`BettingContext::valid_actions`].
///
/// # Examples
///
/// ```
/// use tablestakes_engine::action::Action;
/// use tablestakes_engine::rules::{validate_action, BettingContext, ValidatedAction};
///
/// let ctx = BettingContext { current_bet: 10, player_bet: 5, stack: 95, min_raise: 10 };
/// assert_eq!(validate_action(&ctx, &Action::call(1)), Ok(ValidatedAction::Call(5)));
/// // raising by the whole stack is an all-in
/// assert_eq!(validate_action(&ctx, &Action::raise(1, 95)), Ok(ValidatedAction::AllIn(95)));
/// ```
pub fn validate_action(ctx: &BettingContext, action: &Action) -> Result<ValidatedAction, GameError> {
    let valid = ctx.valid_actions();
    if !valid.contains(&action.kind) {
        return Err(GameError::IllegalAction {
            id: action.player_id,
            kind: action.kind,
            valid,
        });
    }

    let to_call = ctx.to_call();
    let stack = ctx.stack;
    // chips for a sized bet, or None when it needs the whole stack
    let sized = |minimum: u32| {
        let target = action.amount.max(minimum);
        (target < stack).then_some(target)
    };

    let resolved = match action.kind {
        ActionKind::Fold => ValidatedAction::Fold,
        ActionKind::Check => ValidatedAction::Check,
        ActionKind::Call if to_call >= stack => ValidatedAction::AllIn(stack),
        ActionKind::Call => ValidatedAction::Call(to_call),
        ActionKind::Bet => sized(ctx.min_raise)
            .map(ValidatedAction::Bet)
            .unwrap_or(ValidatedAction::AllIn(stack)),
        ActionKind::Raise => sized(to_call.saturating_add(ctx.min_raise))
            .map(ValidatedAction::Raise)
            .unwrap_or(ValidatedAction::AllIn(stack)),
        ActionKind::AllIn => ValidatedAction::AllIn(stack),
    };
    Ok(resolved)
}
