use catalog::cancel::CancellationToken;
use dioxus::prelude::*;

/// A token cancelled when the calling component unmounts. Wrap every fetch the
/// component starts in [`catalog::cancel::cancellable`] with it.
pub fn use_cancellation() -> CancellationToken {
    let token = use_hook(CancellationToken::new);
    use_drop({
        let token = token.clone();
        move || token.cancel()
    });
    token
}
