//! UseCase: チャット送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::execute() メソッド
//! - 本文の検証、チャットログへの追加、全メンバーへのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みメンバーの発言（送信者自身にも届く）
//! - 異常系：未参加の接続、空文字・長すぎる本文
//! - エッジケース：ログ上限を超えたときに古いメッセージから捨てられる

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    ChatMessage, ChatText, ConnectionId, MessagePusher, Nickname, Room, RoomEvent,
    RoomRepository, Timestamp,
};

use super::{error::SendChatError, publish::broadcast};

/// Validated chat intent, ready to be stamped and stored
struct ChatDraft {
    nickname: Nickname,
    text: ChatText,
}

impl ChatDraft {
    fn validate(room: &Room, from: &ConnectionId, raw_text: &str) -> Result<Self, SendChatError> {
        let member = room.member(from).ok_or(SendChatError::NotAMember)?;
        let text = ChatText::new(raw_text)?;
        Ok(Self {
            nickname: member.nickname.clone(),
            text,
        })
    }

    fn into_message(self, sent_at: Timestamp) -> ChatMessage {
        ChatMessage::from_member(self.nickname, self.text, sent_at)
    }
}

/// チャット送信のユースケース
pub struct SendChatUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// チャット送信を実行
    ///
    /// 拒否された場合は何も通知せず、エラーを返すだけ。
    pub async fn execute(
        &self,
        from: &ConnectionId,
        raw_text: &str,
    ) -> Result<ChatMessage, SendChatError> {
        let mut room = self.repository.lock().await;

        let draft = ChatDraft::validate(&room, from, raw_text)?;
        let message = draft.into_message(Timestamp::new(self.clock.now_millis()));
        room.push_chat(message.clone());
        tracing::debug!(
            "Chat from '{}' ({} chars, log size {})",
            message.author.display_name(),
            message.text.chars().count(),
            room.chat().len()
        );

        broadcast(
            self.message_pusher.as_ref(),
            room.member_ids(),
            RoomEvent::ChatBroadcast {
                message: message.clone(),
            },
        )
        .await;

        Ok(message)
    }
}
