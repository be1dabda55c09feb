use super::{authorize_on_request, load_request, prelude::*};
use crate::util::validate;

#[derive(Debug, Clone)]
pub enum MessageTarget {
    Thread(Id),
    /// Starts a new conversation on the request or continues
    /// the one the sender already takes part in.
    Request(Id),
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub target: MessageTarget,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct PostedMessage {
    pub request: Request,
    pub thread: Thread,
    pub message: Message,
}

fn load_thread<R: ThreadRepo>(repo: &R, id: &Id) -> Result<Thread> {
    repo.get_thread(id).map_err(|err| match err {
        RepoError::NotFound => Error::NotFound,
        err => err.into(),
    })
}

fn is_participant<R: ThreadRepo>(repo: &R, thread_id: &Id, user_id: &Id) -> Result<bool> {
    Ok(repo
        .thread_participants(thread_id)?
        .iter()
        .any(|p| &p.user_id == user_id))
}

fn find_or_create_thread<R: Db>(
    repo: &R,
    actor: &Actor,
    request: &Request,
    now: Timestamp,
) -> Result<Thread> {
    for thread in repo.threads_of_request(&request.id)? {
        if is_participant(repo, &thread.id, &actor.id())? {
            return Ok(thread);
        }
    }
    let thread = Thread {
        id: Id::new(),
        request_id: request.id,
        created_at: now,
        updated_at: now,
    };
    repo.create_thread(&thread)?;
    repo.add_thread_participant(&ThreadParticipant {
        thread_id: thread.id,
        user_id: request.creator_id,
        last_viewed_at: None,
    })?;
    log::debug!("Started thread {} on request {}", thread.id, request.id);
    Ok(thread)
}

pub fn post_message<R: Db>(
    repo: &R,
    actor: &Actor,
    new_message: NewMessage,
    now: Timestamp,
) -> Result<PostedMessage> {
    let NewMessage { target, content } = new_message;
    if !validate::is_valid_message_content(&content) {
        return Err(Error::MessageContent);
    }
    let (request, thread) = match target {
        MessageTarget::Thread(thread_id) => {
            let thread = load_thread(repo, &thread_id)?;
            let request = load_request(repo, &thread.request_id)?;
            if !is_participant(repo, &thread.id, &actor.id())? {
                authorize_on_request(repo, actor, &request, Action::AddMessage)?;
            }
            (request, thread)
        }
        MessageTarget::Request(request_id) => {
            let request = load_request(repo, &request_id)?;
            authorize_on_request(repo, actor, &request, Action::AddMessage)?;
            let thread = find_or_create_thread(repo, actor, &request, now)?;
            (request, thread)
        }
    };
    repo.add_thread_participant(&ThreadParticipant {
        thread_id: thread.id,
        user_id: actor.id(),
        last_viewed_at: None,
    })?;
    let message = Message {
        id: Id::new(),
        thread_id: thread.id,
        sender_id: actor.id(),
        content,
        created_at: now,
    };
    repo.create_message(&message)?;
    // The sender has seen everything up to the own message
    repo.set_last_viewed_at(&thread.id, &actor.id(), now)?;
    repo.touch_thread(&thread.id, now)?;
    let thread = Thread {
        updated_at: now,
        ..thread
    };
    Ok(PostedMessage {
        request,
        thread,
        message,
    })
}

#[derive(Debug, Clone)]
pub struct ThreadSummary {
    pub thread: Thread,
    pub participant_ids: Vec<Id>,
    pub unread: u64,
    pub last_message: Option<Message>,
}

/// All threads of the actor, most recently updated first.
pub fn threads_of_actor<R: Db>(repo: &R, actor: &Actor) -> Result<Vec<ThreadSummary>> {
    let threads = repo.threads_of_user(&actor.id())?;
    let mut summaries = Vec::with_capacity(threads.len());
    for thread in threads {
        let participant_ids = repo
            .thread_participants(&thread.id)?
            .into_iter()
            .map(|p| p.user_id)
            .collect();
        let unread = repo.count_unread_messages(&thread.id, &actor.id())?;
        let last_message = repo.messages_of_thread(&thread.id)?.pop();
        summaries.push(ThreadSummary {
            thread,
            participant_ids,
            unread,
            last_message,
        });
    }
    Ok(summaries)
}

pub fn thread_messages<R: Db>(repo: &R, actor: &Actor, thread_id: &Id) -> Result<Vec<Message>> {
    let thread = load_thread(repo, thread_id)?;
    if !is_participant(repo, &thread.id, &actor.id())? {
        return Err(Error::NotFound);
    }
    Ok(repo.messages_of_thread(&thread.id)?)
}

pub fn mark_thread_read<R: Db>(repo: &R, actor: &Actor, thread_id: &Id, now: Timestamp) -> Result<()> {
    let thread = load_thread(repo, thread_id)?;
    if !is_participant(repo, &thread.id, &actor.id())? {
        return Err(Error::NotFound);
    }
    repo.set_last_viewed_at(&thread.id, &actor.id(), now)?;
    Ok(())
}
