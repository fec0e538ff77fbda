/// Fixed mapping from question id to the storage column of the
/// `survey_responses` table. Must stay in lockstep with `data/questions.json`.
pub const COLUMN_MAPPING: &[(u32, &str)] = &[
    (1, "nome_negocio"),
    (2, "tipo_atividade"),
    (3, "canais_venda"),
    (4, "qtd_pessoas"),
    (5, "nivel_tecnologia"),
    (6, "forma_apresentacao"),
    (7, "principais_dificuldades"),
    (8, "frequencia_atualizacao"),
    (9, "perdeu_venda"),
    (10, "desejo_facilidade"),
    (11, "usa_whatsapp_business"),
    (12, "uso_whatsapp"),
    (13, "usou_catalogo_whatsapp"),
    (14, "motivo_catalogo_insuficiente"),
    (15, "interesse_linkize"),
    (16, "caracteristicas_preferidas"),
    (17, "valor_justo"),
    (18, "interesse_teste_gratuito"),
    (19, "motivo_recomendacao"),
    (20, "quer_ser_avisado"),
    (21, "contato"),
];

pub const BUSINESS_NAME: &str = "nome_negocio";
pub const NOTIFY_OPT_IN: &str = "quer_ser_avisado";
pub const NOTIFY_OPT_IN_YES: &str = "Sim, quero participar";
pub const CONTACT: &str = "contato";

pub fn column_for(question_id: u32) -> Option<&'static str> {
    COLUMN_MAPPING
        .iter()
        .find(|(id, _)| *id == question_id)
        .map(|(_, column)| *column)
}
