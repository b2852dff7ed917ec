//! Prompt construction for the generation service
//!
//! Prompts are Japanese-language, matching the persona templates. Each
//! builder takes plain domain values; nothing here talks to the network.

use std::collections::HashMap;

use danran::domain::{ConversationTurn, FamilyRole, HappyMoment, Persona, RoleTemplate, UserProfile};

/// Render the trailing context window as "speaker (role): message" lines
pub fn render_context(window: &[ConversationTurn]) -> String {
    let mut context = String::new();
    for turn in window {
        let role = turn
            .role
            .map(|r| r.to_string())
            .unwrap_or_else(|| "user".to_string());
        context.push_str(&format!("{} ({}): {}\n", turn.speaker, role, turn.message));
    }
    context
}

fn persona_profile_block(persona: &Persona) -> String {
    format!(
        "基本情報：\n\
         - 年齢: {}歳\n\
         - 性格: {}\n\
         - 話し方: {}（{}）\n\
         - 興味: {}\n\
         - 価値観: {}\n\
         - 現在の感情: {}\n\
         - ユーザーとの関係: {}",
        persona.age,
        persona.personality_traits.join("、"),
        persona.speaking_style.tone,
        persona.speaking_style.vocabulary,
        persona.interests.join("、"),
        persona.values.join("、"),
        persona.current_emotion,
        persona.relationship_to_user,
    )
}

/// Response prompt for one persona against the frozen context snapshot
pub fn response_prompt(persona: &Persona, user_message: &str, context: &str) -> String {
    format!(
        "あなたは{}（{}）です。\n\n\
         {}\n\n\
         会話の文脈：\n{}\n\
         ユーザーの最新メッセージ：{}\n\n\
         あなたの性格と話し方に合った応答をしてください。\n\
         家族の一員として、温かく親しみやすい応答を心がけてください。",
        persona.name,
        persona.role,
        persona_profile_block(persona),
        context,
        user_message,
    )
}

/// Greeting prompt emitted once at session start
pub fn greeting_prompt(persona: &Persona) -> String {
    format!(
        "あなたは{}（{}）です。\n\n\
         {}\n\n\
         家族の新しいメンバー（ユーザー）に温かく挨拶してください。\n\
         あなたの性格と話し方に合った挨拶をしてください。",
        persona.name,
        persona.role,
        persona_profile_block(persona),
    )
}

/// Emotion classification prompt for a completed response
pub fn emotion_prompt(persona: &Persona, user_message: &str, reply: &str) -> String {
    format!(
        "{name}の性格: {traits}\n\
         ユーザーのメッセージ: {user_message}\n\
         {name}の応答: {reply}\n\n\
         {name}の現在の感情を以下のいずれかから選択してください：\n\
         - happy (嬉しい)\n\
         - excited (興奮)\n\
         - calm (落ち着いた)\n\
         - loving (愛情深い)\n\
         - curious (好奇心)\n\
         - worried (心配)\n\
         - proud (誇り)\n\
         - nostalgic (懐かしい)\n\n\
         感情のラベルだけを返してください。",
        name = persona.name,
        traits = persona.personality_traits.join("、"),
        user_message = user_message,
        reply = reply,
    )
}

/// Personality flavoring prompt used at instantiation (best-effort)
pub fn personality_prompt(template: &RoleTemplate, profile: &UserProfile) -> String {
    let age = profile
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "不明".to_string());
    format!(
        "ユーザー情報を基に、{}の性格を生成してください。\n\n\
         ユーザー情報：\n\
         - 年齢: {}\n\
         - 趣味: {}\n\
         - ライフスタイル: {}\n\n\
         ロール: {}\n\
         基本性格: {}\n\n\
         ユーザーと相性の良い性格を生成してください。\n\
         {{\"traits\": [\"...\"]}} のJSON形式で返してください。",
        template.display_name,
        age,
        profile.interests.join("、"),
        profile.lifestyle,
        template.role,
        template.personality_traits.join("、"),
    )
}

/// Scene rendering prompt for the latest happy moment
pub fn scene_prompt(moment: &HappyMoment) -> String {
    let mut interactions = String::new();
    for (role, message) in &moment.role_interactions {
        interactions.push_str(&format!("- {}: {}\n", role, message));
    }
    format!(
        "以下の幸せなひとときを基に、家族のシーンを詳細に描写してください。\n\n\
         活動: {}\n\
         説明: {}\n\
         感情: {}\n\
         参加者: {}\n\
         設定: {}\n\
         ロール別の関与:\n{}\n\
         家族の温かい雰囲気と幸せな瞬間を詳細に描写してください。\n\
         scene（シーン名）, description（描写）, emotions（感情のリスト）の\
         キーを持つJSONオブジェクトだけを返してください。",
        moment.activity,
        moment.description,
        moment.emotions.join("、"),
        moment.participants.join("、"),
        moment.setting,
        interactions,
    )
}

/// Structured extraction prompt for a completed round
pub fn moment_prompt(user_message: &str, role_interactions: &HashMap<FamilyRole, String>) -> String {
    let mut interactions = String::new();
    for (role, message) in role_interactions {
        interactions.push_str(&format!("- {}: {}\n", role, message));
    }
    format!(
        "以下の会話から、家族の幸せなひとときを抽出してください。\n\n\
         ユーザーのメッセージ: {}\n\
         ロール別の応答:\n{}\n\
         以下のキーを持つJSONオブジェクトだけを返してください：\n\
         activity（活動内容）, description（説明）, emotions（感情のリスト）, \
         participants（参加者のリスト）, setting（設定・場所）",
        user_message, interactions,
    )
}
