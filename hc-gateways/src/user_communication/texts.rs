use hc_core::notification::Template;
use hc_entities::user::Language;

pub const fn greeting(language: Language) -> &'static str {
    match language {
        Language::En => "Hello,",
        Language::Fr => "Bonjour,",
        Language::Es => "Hola,",
        Language::Ko => "안녕하세요,",
        Language::Pt => "Olá,",
    }
}

pub const fn footer(language: Language) -> &'static str {
    match language {
        Language::En => "You receive this email because you take part in a hand-carry request.",
        Language::Fr => "Vous recevez cet e-mail car vous participez à une demande de transport.",
        Language::Es => "Recibes este correo porque participas en una solicitud de transporte.",
        Language::Ko => "운반 요청에 참여하고 있어 이 이메일을 받으셨습니다.",
        Language::Pt => "Você recebe este e-mail porque participa de um pedido de transporte.",
    }
}

#[rustfmt::skip]
pub const fn headline(template: Template, language: Language) -> &'static str {
    use Language as L;
    use Template as T;
    match (template, language) {
        (T::RequestCreated,     L::En) => "New request",
        (T::RequestCreated,     L::Fr) => "Nouvelle demande",
        (T::RequestCreated,     L::Es) => "Nueva solicitud",
        (T::RequestCreated,     L::Ko) => "새 요청",
        (T::RequestCreated,     L::Pt) => "Novo pedido",

        (T::RequestAccepted,    L::En) => "Your offer has been accepted",
        (T::RequestAccepted,    L::Fr) => "Votre offre a été acceptée",
        (T::RequestAccepted,    L::Es) => "Tu oferta ha sido aceptada",
        (T::RequestAccepted,    L::Ko) => "제안이 수락되었습니다",
        (T::RequestAccepted,    L::Pt) => "Sua oferta foi aceita",

        (T::OfferDeclined,      L::En) => "Someone else will carry this request",
        (T::OfferDeclined,      L::Fr) => "Une autre personne transportera cette demande",
        (T::OfferDeclined,      L::Es) => "Otra persona llevará esta solicitud",
        (T::OfferDeclined,      L::Ko) => "다른 사람이 이 요청을 운반합니다",
        (T::OfferDeclined,      L::Pt) => "Outra pessoa levará este pedido",

        (T::RequestReverted,    L::En) => "The request is open again",
        (T::RequestReverted,    L::Fr) => "La demande est de nouveau ouverte",
        (T::RequestReverted,    L::Es) => "La solicitud está abierta de nuevo",
        (T::RequestReverted,    L::Ko) => "요청이 다시 열렸습니다",
        (T::RequestReverted,    L::Pt) => "O pedido está aberto novamente",

        (T::RequestDelivered,   L::En) => "Your request has been delivered",
        (T::RequestDelivered,   L::Fr) => "Votre demande a été livrée",
        (T::RequestDelivered,   L::Es) => "Tu solicitud ha sido entregada",
        (T::RequestDelivered,   L::Ko) => "요청하신 물품이 배달되었습니다",
        (T::RequestDelivered,   L::Pt) => "Seu pedido foi entregue",

        (T::RequestCompleted,   L::En) => "The delivery has been confirmed",
        (T::RequestCompleted,   L::Fr) => "La livraison a été confirmée",
        (T::RequestCompleted,   L::Es) => "La entrega ha sido confirmada",
        (T::RequestCompleted,   L::Ko) => "배달이 확인되었습니다",
        (T::RequestCompleted,   L::Pt) => "A entrega foi confirmada",

        (T::RequestRemoved,     L::En) => "The request has been removed",
        (T::RequestRemoved,     L::Fr) => "La demande a été supprimée",
        (T::RequestRemoved,     L::Es) => "La solicitud ha sido eliminada",
        (T::RequestRemoved,     L::Ko) => "요청이 삭제되었습니다",
        (T::RequestRemoved,     L::Pt) => "O pedido foi removido",

        (T::RequestReturned,    L::En) => "The delivery has been withdrawn",
        (T::RequestReturned,    L::Fr) => "La livraison a été annulée",
        (T::RequestReturned,    L::Es) => "La entrega ha sido retirada",
        (T::RequestReturned,    L::Ko) => "배달이 취소되었습니다",
        (T::RequestReturned,    L::Pt) => "A entrega foi retirada",

        (T::RequestNotReceived, L::En) => "The request has not been received after all",
        (T::RequestNotReceived, L::Fr) => "La demande n'a finalement pas été reçue",
        (T::RequestNotReceived, L::Es) => "La solicitud finalmente no fue recibida",
        (T::RequestNotReceived, L::Ko) => "요청 물품이 아직 수령되지 않았습니다",
        (T::RequestNotReceived, L::Pt) => "O pedido afinal não foi recebido",

        (T::RequestOutdated,    L::En) => "Your request is past its date",
        (T::RequestOutdated,    L::Fr) => "La date de votre demande est dépassée",
        (T::RequestOutdated,    L::Es) => "La fecha de tu solicitud ha pasado",
        (T::RequestOutdated,    L::Ko) => "요청 기한이 지났습니다",
        (T::RequestOutdated,    L::Pt) => "A data do seu pedido já passou",

        (T::MessageCreated,     L::En) => "New message",
        (T::MessageCreated,     L::Fr) => "Nouveau message",
        (T::MessageCreated,     L::Es) => "Nuevo mensaje",
        (T::MessageCreated,     L::Ko) => "새 메시지",
        (T::MessageCreated,     L::Pt) => "Nova mensagem",

        (T::OfferAdded,         L::En) => "New offer for your request",
        (T::OfferAdded,         L::Fr) => "Nouvelle offre pour votre demande",
        (T::OfferAdded,         L::Es) => "Nueva oferta para tu solicitud",
        (T::OfferAdded,         L::Ko) => "요청에 새 제안이 있습니다",
        (T::OfferAdded,         L::Pt) => "Nova oferta para o seu pedido",

        (T::OfferWithdrawn,     L::En) => "An offer has been withdrawn",
        (T::OfferWithdrawn,     L::Fr) => "Une offre a été retirée",
        (T::OfferWithdrawn,     L::Es) => "Se ha retirado una oferta",
        (T::OfferWithdrawn,     L::Ko) => "제안이 철회되었습니다",
        (T::OfferWithdrawn,     L::Pt) => "Uma oferta foi retirada",

        (T::OfferRejected,      L::En) => "Your offer has been declined",
        (T::OfferRejected,      L::Fr) => "Votre offre a été refusée",
        (T::OfferRejected,      L::Es) => "Tu oferta ha sido rechazada",
        (T::OfferRejected,      L::Ko) => "제안이 거절되었습니다",
        (T::OfferRejected,      L::Pt) => "Sua oferta foi recusada",

        (T::MeetingInvite,      L::En) => "You are invited to a meeting",
        (T::MeetingInvite,      L::Fr) => "Vous êtes invité à une rencontre",
        (T::MeetingInvite,      L::Es) => "Estás invitado a un encuentro",
        (T::MeetingInvite,      L::Ko) => "모임에 초대되었습니다",
        (T::MeetingInvite,      L::Pt) => "Você foi convidado para um encontro",
    }
}
