//! Numeric reply codes named by the core's client-addressable error paths.
//!
//! Only the subset of RFC 1459/2812 numerics this core actually emits is
//! represented; numerics are always three digits on the wire regardless of
//! link kind.

use crate::message::Message;
use crate::prefix::Prefix;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    RplWelcome = 1,
    RplYourHost = 2,
    RplCreated = 3,
    RplMyInfo = 4,
    RplIsupport = 5,

    ErrNoSuchNick = 401,
    ErrNoSuchServer = 402,
    ErrNoSuchChannel = 403,
    ErrCannotSendToChan = 404,
    ErrTooManyChannels = 405,
    ErrTooManyTargets = 407,
    ErrNoTopLevel = 413,
    ErrWildTopLevel = 414,
    ErrErroneusNickname = 432,
    ErrNickNameInUse = 433,
    ErrBanNickChange = 435,
    ErrBannedFromChan = 474,
    ErrInviteOnlyChan = 473,
    ErrChannelIsFull = 471,
    ErrBadChannelKey = 475,
    ErrPasswdMismatch = 464,
    ErrNoOperHost = 491,
    ErrSilenced = 488,
    ErrNeedMoreParams = 461,
    ErrUnknownCommand = 421,
}

impl Response {
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Build the reply line: `:server CODE target text...`.
    pub fn reply(self, server_name: &str, target: &str, params: &[&str]) -> Message {
        let mut msg = Message::new(format!("{:03}", self.code()))
            .with_prefix(Prefix::Nick(server_name.to_string()))
            .with_param(target);
        for p in params {
            msg = msg.with_param(*p);
        }
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_has_three_digit_code() {
        let msg = Response::ErrNoSuchNick.reply("irc.example", "Wiz", &["bob", "No such nick"]);
        assert_eq!(msg.command, "401");
        assert_eq!(msg.params[0], "Wiz");
    }

    #[test]
    fn codes_match_rfc_numbers() {
        assert_eq!(Response::ErrNickNameInUse.code(), 433);
        assert_eq!(Response::ErrChannelIsFull.code(), 471);
        assert_eq!(Response::ErrBannedFromChan.code(), 474);
    }
}
