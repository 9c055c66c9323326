//! Known Web API methods and their default pagination behavior.
//!
//! Method identifiers are plain strings; any of the constants below, a bare
//! method name or a full URL can be passed to the request builders. The
//! defaults table only lists methods that paginate, everything else is
//! looked up as a plain endpoint.

use crate::errors::SlackError;
use crate::pagination::PaginationMode;

/// Base URL of the Web API.
pub const ROOT_URL: &str = "https://slack.com/api/";

/// Base URL of incoming webhooks.
pub const HOOK_URL: &str = "https://hooks.slack.com";

// api
pub const API_TEST: &str = "api.test";

// apps.permissions
pub const APPS_PERMISSIONS_INFO: &str = "apps.permissions.info";
pub const APPS_PERMISSIONS_REQUEST: &str = "apps.permissions.request";

// auth
pub const AUTH_REVOKE: &str = "auth.revoke";
pub const AUTH_TEST: &str = "auth.test";

// bots
pub const BOTS_INFO: &str = "bots.info";

// channels
pub const CHANNELS_ARCHIVE: &str = "channels.archive";
pub const CHANNELS_CREATE: &str = "channels.create";
pub const CHANNELS_HISTORY: &str = "channels.history";
pub const CHANNELS_INFO: &str = "channels.info";
pub const CHANNELS_INVITE: &str = "channels.invite";
pub const CHANNELS_JOIN: &str = "channels.join";
pub const CHANNELS_KICK: &str = "channels.kick";
pub const CHANNELS_LEAVE: &str = "channels.leave";
pub const CHANNELS_LIST: &str = "channels.list";
pub const CHANNELS_MARK: &str = "channels.mark";
pub const CHANNELS_RENAME: &str = "channels.rename";
pub const CHANNELS_REPLIES: &str = "channels.replies";
pub const CHANNELS_SET_PURPOSE: &str = "channels.setPurpose";
pub const CHANNELS_SET_TOPIC: &str = "channels.setTopic";
pub const CHANNELS_UNARCHIVE: &str = "channels.unarchive";

// chat
pub const CHAT_DELETE: &str = "chat.delete";
pub const CHAT_ME_MESSAGE: &str = "chat.meMessage";
pub const CHAT_POST_EPHEMERAL: &str = "chat.postEphemeral";
pub const CHAT_POST_MESSAGE: &str = "chat.postMessage";
pub const CHAT_UNFURL: &str = "chat.unfurl";
pub const CHAT_UPDATE: &str = "chat.update";

// conversations
pub const CONVERSATIONS_ARCHIVE: &str = "conversations.archive";
pub const CONVERSATIONS_CLOSE: &str = "conversations.close";
pub const CONVERSATIONS_CREATE: &str = "conversations.create";
pub const CONVERSATIONS_HISTORY: &str = "conversations.history";
pub const CONVERSATIONS_INFO: &str = "conversations.info";
pub const CONVERSATIONS_INVITE: &str = "conversations.invite";
pub const CONVERSATIONS_JOIN: &str = "conversations.join";
pub const CONVERSATIONS_KICK: &str = "conversations.kick";
pub const CONVERSATIONS_LEAVE: &str = "conversations.leave";
pub const CONVERSATIONS_LIST: &str = "conversations.list";
pub const CONVERSATIONS_MEMBERS: &str = "conversations.members";
pub const CONVERSATIONS_OPEN: &str = "conversations.open";
pub const CONVERSATIONS_RENAME: &str = "conversations.rename";
pub const CONVERSATIONS_REPLIES: &str = "conversations.replies";
pub const CONVERSATIONS_SET_PURPOSE: &str = "conversations.setPurpose";
pub const CONVERSATIONS_SET_TOPIC: &str = "conversations.setTopic";
pub const CONVERSATIONS_UNARCHIVE: &str = "conversations.unarchive";

// dialog
pub const DIALOG_OPEN: &str = "dialog.open";

// dnd
pub const DND_END_DND: &str = "dnd.endDnd";
pub const DND_END_SNOOZE: &str = "dnd.endSnooze";
pub const DND_INFO: &str = "dnd.info";
pub const DND_SET_SNOOZE: &str = "dnd.setSnooze";
pub const DND_TEAM_INFO: &str = "dnd.teamInfo";

// emoji
pub const EMOJI_LIST: &str = "emoji.list";

// files.comments
pub const FILES_COMMENTS_ADD: &str = "files.comments.add";
pub const FILES_COMMENTS_DELETE: &str = "files.comments.delete";
pub const FILES_COMMENTS_EDIT: &str = "files.comments.edit";

// files
pub const FILES_DELETE: &str = "files.delete";
pub const FILES_INFO: &str = "files.info";
pub const FILES_LIST: &str = "files.list";
pub const FILES_REVOKE_PUBLIC_URL: &str = "files.revokePublicURL";
pub const FILES_SHARED_PUBLIC_URL: &str = "files.sharedPublicURL";
pub const FILES_UPLOAD: &str = "files.upload";

// groups
pub const GROUPS_ARCHIVE: &str = "groups.archive";
pub const GROUPS_CREATE: &str = "groups.create";
pub const GROUPS_CREATE_CHILD: &str = "groups.createChild";
pub const GROUPS_HISTORY: &str = "groups.history";
pub const GROUPS_INFO: &str = "groups.info";
pub const GROUPS_INVITE: &str = "groups.invite";
pub const GROUPS_KICK: &str = "groups.kick";
pub const GROUPS_LEAVE: &str = "groups.leave";
pub const GROUPS_LIST: &str = "groups.list";
pub const GROUPS_MARK: &str = "groups.mark";
pub const GROUPS_OPEN: &str = "groups.open";
pub const GROUPS_RENAME: &str = "groups.rename";
pub const GROUPS_REPLIES: &str = "groups.replies";
pub const GROUPS_SET_PURPOSE: &str = "groups.setPurpose";
pub const GROUPS_SET_TOPIC: &str = "groups.setTopic";
pub const GROUPS_UNARCHIVE: &str = "groups.unarchive";

// im
pub const IM_CLOSE: &str = "im.close";
pub const IM_HISTORY: &str = "im.history";
pub const IM_LIST: &str = "im.list";
pub const IM_MARK: &str = "im.mark";
pub const IM_OPEN: &str = "im.open";
pub const IM_REPLIES: &str = "im.replies";

// migration
pub const MIGRATION_EXCHANGE: &str = "migration.exchange";

// mpim
pub const MPIM_CLOSE: &str = "mpim.close";
pub const MPIM_HISTORY: &str = "mpim.history";
pub const MPIM_LIST: &str = "mpim.list";
pub const MPIM_MARK: &str = "mpim.mark";
pub const MPIM_OPEN: &str = "mpim.open";
pub const MPIM_REPLIES: &str = "mpim.replies";

// oauth
pub const OAUTH_ACCESS: &str = "oauth.access";
pub const OAUTH_TOKEN: &str = "oauth.token";

// pins
pub const PINS_ADD: &str = "pins.add";
pub const PINS_LIST: &str = "pins.list";
pub const PINS_REMOVE: &str = "pins.remove";

// reactions
pub const REACTIONS_ADD: &str = "reactions.add";
pub const REACTIONS_GET: &str = "reactions.get";
pub const REACTIONS_LIST: &str = "reactions.list";
pub const REACTIONS_REMOVE: &str = "reactions.remove";

// reminders
pub const REMINDERS_ADD: &str = "reminders.add";
pub const REMINDERS_COMPLETE: &str = "reminders.complete";
pub const REMINDERS_DELETE: &str = "reminders.delete";
pub const REMINDERS_INFO: &str = "reminders.info";
pub const REMINDERS_LIST: &str = "reminders.list";

// rtm
pub const RTM_CONNECT: &str = "rtm.connect";
pub const RTM_START: &str = "rtm.start";

// search
pub const SEARCH_ALL: &str = "search.all";
pub const SEARCH_FILES: &str = "search.files";
pub const SEARCH_MESSAGES: &str = "search.messages";

// stars
pub const STARS_ADD: &str = "stars.add";
pub const STARS_LIST: &str = "stars.list";
pub const STARS_REMOVE: &str = "stars.remove";

// team
pub const TEAM_ACCESS_LOGS: &str = "team.accessLogs";
pub const TEAM_BILLABLE_INFO: &str = "team.billableInfo";
pub const TEAM_INFO: &str = "team.info";
pub const TEAM_INTEGRATION_LOGS: &str = "team.integrationLogs";
pub const TEAM_PROFILE_GET: &str = "team.profile.get";

// usergroups
pub const USERGROUPS_CREATE: &str = "usergroups.create";
pub const USERGROUPS_DISABLE: &str = "usergroups.disable";
pub const USERGROUPS_ENABLE: &str = "usergroups.enable";
pub const USERGROUPS_LIST: &str = "usergroups.list";
pub const USERGROUPS_UPDATE: &str = "usergroups.update";
pub const USERGROUPS_USERS_LIST: &str = "usergroups.users.list";
pub const USERGROUPS_USERS_UPDATE: &str = "usergroups.users.update";

// users
pub const USERS_DELETE_PHOTO: &str = "users.deletePhoto";
pub const USERS_GET_PRESENCE: &str = "users.getPresence";
pub const USERS_IDENTITY: &str = "users.identity";
pub const USERS_INFO: &str = "users.info";
pub const USERS_LIST: &str = "users.list";
pub const USERS_SET_ACTIVE: &str = "users.setActive";
pub const USERS_SET_PHOTO: &str = "users.setPhoto";
pub const USERS_SET_PRESENCE: &str = "users.setPresence";
pub const USERS_PROFILE_GET: &str = "users.profile.get";
pub const USERS_PROFILE_SET: &str = "users.profile.set";

/// Default pagination mode and response key for a method, if it paginates.
///
/// Accepts a bare method name or its full Web API URL.
#[must_use]
pub fn default_iteration(method: &str) -> Option<(PaginationMode, &'static str)> {
    let name = method.strip_prefix(ROOT_URL).unwrap_or(method);
    match name {
        CHANNELS_LIST | CONVERSATIONS_LIST => Some((PaginationMode::Cursor, "channels")),
        CONVERSATIONS_HISTORY | CONVERSATIONS_REPLIES => {
            Some((PaginationMode::Cursor, "messages"))
        }
        CONVERSATIONS_MEMBERS => Some((PaginationMode::Cursor, "members")),
        IM_LIST => Some((PaginationMode::Cursor, "ims")),
        USERS_LIST => Some((PaginationMode::Cursor, "members")),
        CHANNELS_HISTORY | GROUPS_HISTORY | IM_HISTORY | MPIM_HISTORY => {
            Some((PaginationMode::Timeline, "messages"))
        }
        FILES_LIST => Some((PaginationMode::Page, "files")),
        REACTIONS_LIST | STARS_LIST => Some((PaginationMode::Page, "items")),
        SEARCH_ALL | SEARCH_MESSAGES => Some((PaginationMode::Page, "messages")),
        SEARCH_FILES => Some((PaginationMode::Page, "files")),
        TEAM_ACCESS_LOGS => Some((PaginationMode::Page, "logins")),
        TEAM_INTEGRATION_LOGS => Some((PaginationMode::Page, "logs")),
        _ => None,
    }
}

/// Resolve the pagination mode and response key for an endpoint.
///
/// Caller-supplied overrides take precedence over the registry defaults.
/// Fails when neither source settles both pieces.
pub fn find_iteration(
    endpoint: &str,
    itermode: Option<PaginationMode>,
    iterkey: Option<&str>,
) -> Result<(PaginationMode, String), SlackError> {
    let defaults = default_iteration(endpoint);
    let itermode = itermode.or_else(|| defaults.map(|(mode, _)| mode));
    let iterkey = iterkey
        .map(ToString::to_string)
        .or_else(|| defaults.map(|(_, key)| key.to_string()));

    match (itermode, iterkey) {
        (Some(mode), Some(key)) => Ok((mode, key)),
        _ => Err(SlackError::IterationNotFound {
            endpoint: endpoint.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_iteration_defaults() {
        let (itermode, iterkey) = find_iteration(CHANNELS_LIST, None, None).unwrap();
        assert_eq!(itermode, PaginationMode::Cursor);
        assert_eq!(iterkey, "channels");
    }

    #[test]
    fn test_find_iteration_custom_itermode() {
        let (itermode, iterkey) =
            find_iteration(CHANNELS_LIST, Some(PaginationMode::Timeline), None).unwrap();
        assert_eq!(itermode, PaginationMode::Timeline);
        assert_eq!(iterkey, "channels");
    }

    #[test]
    fn test_find_iteration_custom_iterkey() {
        let (itermode, iterkey) = find_iteration(CHANNELS_LIST, None, Some("users")).unwrap();
        assert_eq!(itermode, PaginationMode::Cursor);
        assert_eq!(iterkey, "users");
    }

    #[test]
    fn test_find_iteration_not_found() {
        let err = find_iteration("", None, None).unwrap_err();
        assert!(matches!(err, SlackError::IterationNotFound { .. }));
    }

    #[test]
    fn test_find_iteration_partial_override_not_found() {
        let err = find_iteration(AUTH_TEST, Some(PaginationMode::Cursor), None).unwrap_err();
        assert!(matches!(err, SlackError::IterationNotFound { .. }));
    }

    #[test]
    fn test_default_iteration_full_url() {
        let by_name = default_iteration(USERS_LIST);
        let by_url = default_iteration("https://slack.com/api/users.list");
        assert_eq!(by_name, by_url);
        assert_eq!(by_name, Some((PaginationMode::Cursor, "members")));
    }

    #[test]
    fn test_default_iteration_unknown() {
        assert!(default_iteration(AUTH_TEST).is_none());
        assert!(default_iteration("not.a.method").is_none());
    }
}
