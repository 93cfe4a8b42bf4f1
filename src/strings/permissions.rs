//! # Permission Names
//!
//! Display names for each permission, one table per language.

use crate::domain::permissions::Permission;
use crate::strings::Language;

pub fn permission_name(permission: Permission, language: Language) -> &'static str {
    match language {
        Language::English => english(permission),
        Language::Portuguese => portuguese(permission),
    }
}

fn english(permission: Permission) -> &'static str {
    match permission {
        Permission::CreateInstantInvite => "Create Instant Invite",
        Permission::KickMembers => "Kick Members",
        Permission::BanMembers => "Ban Members",
        Permission::Administrator => "Administrator",
        Permission::ManageChannels => "Manage Channels",
        Permission::ManageGuild => "Manage Server",
        Permission::AddReactions => "Add Reactions",
        Permission::ViewAuditLog => "View Audit Log",
        Permission::PrioritySpeaker => "Priority Speaker",
        Permission::Stream => "Video",
        Permission::ViewChannel => "View Channel",
        Permission::SendMessages => "Send Messages",
        Permission::SendTTSMessages => "Send TTS Messages",
        Permission::ManageMessages => "Manage Messages",
        Permission::EmbedLinks => "Embed Links",
        Permission::AttachFiles => "Attach Files",
        Permission::ReadMessageHistory => "Read Message History",
        Permission::MentionEveryone => "Mention Everyone",
        Permission::UseExternalEmojis => "Use External Emojis",
        Permission::ViewGuildInsights => "View Server Insights",
        Permission::Connect => "Connect",
        Permission::Speak => "Speak",
        Permission::MuteMembers => "Mute Members",
        Permission::DeafenMembers => "Deafen Members",
        Permission::MoveMembers => "Move Members",
        Permission::UseVAD => "Use Voice Activity",
        Permission::ChangeNickname => "Change Nickname",
        Permission::ManageNicknames => "Manage Nicknames",
        Permission::ManageRoles => "Manage Roles",
        Permission::ManageWebhooks => "Manage Webhooks",
        Permission::ManageEmojisAndStickers => "Manage Emojis and Stickers",
        Permission::UseApplicationCommands => "Use Application Commands",
        Permission::RequestToSpeak => "Request to Speak",
        Permission::ManageEvents => "Manage Events",
        Permission::ManageThreads => "Manage Threads",
        Permission::CreatePublicThreads => "Create Public Threads",
        Permission::CreatePrivateThreads => "Create Private Threads",
        Permission::UseExternalStickers => "Use External Stickers",
        Permission::SendMessagesInThreads => "Send Messages in Threads",
        Permission::UseEmbeddedActivities => "Use Activities",
        Permission::ModerateMembers => "Timeout Members",
    }
}

fn portuguese(permission: Permission) -> &'static str {
    match permission {
        Permission::CreateInstantInvite => "Criar Convite Instantâneo",
        Permission::KickMembers => "Expulsar Membros",
        Permission::BanMembers => "Banir Membros",
        Permission::Administrator => "Administrador",
        Permission::ManageChannels => "Gerenciar Canais",
        Permission::ManageGuild => "Gerenciar Servidor",
        Permission::AddReactions => "Adicionar Reações",
        Permission::ViewAuditLog => "Ver Registro de Auditoria",
        Permission::PrioritySpeaker => "Voz Prioritária",
        Permission::Stream => "Vídeo",
        Permission::ViewChannel => "Ver Canal",
        Permission::SendMessages => "Enviar Mensagens",
        Permission::SendTTSMessages => "Enviar Mensagens em TTS",
        Permission::ManageMessages => "Gerenciar Mensagens",
        Permission::EmbedLinks => "Inserir Links",
        Permission::AttachFiles => "Anexar Arquivos",
        Permission::ReadMessageHistory => "Ver Histórico de Mensagens",
        Permission::MentionEveryone => "Mencionar Todos",
        Permission::UseExternalEmojis => "Usar Emojis Externos",
        Permission::ViewGuildInsights => "Ver Análises do Servidor",
        Permission::Connect => "Conectar",
        Permission::Speak => "Falar",
        Permission::MuteMembers => "Silenciar Membros",
        Permission::DeafenMembers => "Ensurdecer Membros",
        Permission::MoveMembers => "Mover Membros",
        Permission::UseVAD => "Usar Detecção de Voz",
        Permission::ChangeNickname => "Alterar Apelido",
        Permission::ManageNicknames => "Gerenciar Apelidos",
        Permission::ManageRoles => "Gerenciar Cargos",
        Permission::ManageWebhooks => "Gerenciar Webhooks",
        Permission::ManageEmojisAndStickers => "Gerenciar Emojis e Figurinhas",
        Permission::UseApplicationCommands => "Usar Comandos de Aplicativo",
        Permission::RequestToSpeak => "Pedir para Falar",
        Permission::ManageEvents => "Gerenciar Eventos",
        Permission::ManageThreads => "Gerenciar Tópicos",
        Permission::CreatePublicThreads => "Criar Tópicos Públicos",
        Permission::CreatePrivateThreads => "Criar Tópicos Privados",
        Permission::UseExternalStickers => "Usar Figurinhas Externas",
        Permission::SendMessagesInThreads => "Enviar Mensagens em Tópicos",
        Permission::UseEmbeddedActivities => "Usar Atividades",
        Permission::ModerateMembers => "Castigar Membros",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_administrator_names() {
        assert_eq!(permission_name(Permission::Administrator, Language::English), "Administrator");
        assert_eq!(
            permission_name(Permission::Administrator, Language::Portuguese),
            "Administrador"
        );
    }

    #[test]
    fn test_localized_lookup() {
        assert_eq!(permission_name(Permission::BanMembers, Language::English), "Ban Members");
        assert_eq!(permission_name(Permission::BanMembers, Language::Portuguese), "Banir Membros");
    }
}
