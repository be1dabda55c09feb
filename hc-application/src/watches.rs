use super::*;
use usecases::NewWatch;

pub fn create_watch(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    new_watch: NewWatch,
) -> Result<Watch> {
    write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::create_watch(db, actor, new_watch.clone(), Timestamp::now())
    })
}

pub fn watches_of_user(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
) -> Result<Vec<Watch>> {
    read_as_user(connections, deadline, user_id, |db, actor| {
        usecases::watches_of_actor(db, actor)
    })
}

pub fn delete_watch(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    id: &Id,
) -> Result<()> {
    write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::delete_watch(db, actor, id)
    })
}
