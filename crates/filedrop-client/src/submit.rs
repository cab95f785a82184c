//! Drive one upload attempt through an `UploadSession`.

use filedrop_core::{ProgressEvent, UploadSession, UploadState};

use crate::progress::{progress_channel, ProgressReceiver};
use crate::UploadClient;

/// Submit the session's accepted file.
///
/// `on_update` is called with the session state when the attempt starts,
/// after every progress step, and once more with the terminal state. When
/// there is no accepted file, or an attempt is already running, nothing
/// happens and `on_update` is not called.
pub async fn submit<'s, F>(
    client: &UploadClient,
    session: &'s mut UploadSession,
    mut on_update: F,
) -> &'s UploadState
where
    F: FnMut(&UploadState),
{
    let Some(file) = session.begin_upload() else {
        tracing::debug!(state = session.state().name(), "Submit ignored");
        return session.state();
    };
    on_update(session.state());

    let (tx, mut rx) = progress_channel();
    let upload = client.upload_file(&file, tx);
    tokio::pin!(upload);

    let outcome = loop {
        tokio::select! {
            biased;
            Some(event) = rx.recv() => apply(session, event, &mut on_update),
            outcome = &mut upload => break outcome,
        }
    };

    drain(&mut rx, session, &mut on_update);
    session.complete(outcome);
    on_update(session.state());
    session.state()
}

fn drain<F>(rx: &mut ProgressReceiver, session: &mut UploadSession, on_update: &mut F)
where
    F: FnMut(&UploadState),
{
    while let Ok(event) = rx.try_recv() {
        apply(session, event, on_update);
    }
}

fn apply<F>(session: &mut UploadSession, event: ProgressEvent, on_update: &mut F)
where
    F: FnMut(&UploadState),
{
    match event {
        ProgressEvent::Advanced(percent) => {
            session.record_progress(percent);
            on_update(session.state());
        }
        ProgressEvent::Finished => {}
    }
}
