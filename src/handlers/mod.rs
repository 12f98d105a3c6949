//! One module per command verb, each implementing [`crate::dispatcher::Handler`].

mod join;
mod kill;
mod nick;
mod privmsg;
mod squit;

use std::sync::Arc;

use crate::dispatcher::Dispatcher;

/// Build a dispatcher with every handler this core ships registered under
/// its canonical long verb name.
pub fn build_dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("NICK", Arc::new(nick::NickHandler));
    dispatcher.register("JOIN", Arc::new(join::JoinHandler));
    dispatcher.register("PRIVMSG", Arc::new(privmsg::PrivmsgHandler));
    dispatcher.register("NOTICE", Arc::new(privmsg::NoticeHandler));
    dispatcher.register("KILL", Arc::new(kill::KillHandler));
    dispatcher.register("SQUIT", Arc::new(squit::SquitHandler));
    dispatcher
}
