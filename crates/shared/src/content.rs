//! Static marketing copy shown alongside the server-fed collections.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPlan {
    pub title: &'static str,
    pub price: &'static str,
    pub duration: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodStep {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactChannel {
    pub label: &'static str,
    pub value: &'static str,
    pub href: &'static str,
}

pub const BRAND: &str = "Bassa Soufian";
pub const TAGLINE: &str = "Cours particuliers de Mathématiques & Physique";

pub const PRICING_PLANS: &[PricingPlan] = &[
    PricingPlan {
        title: "Formule Excellence Annuelle",
        price: "199€",
        duration: "/ mois (sur 10 mois)",
        features: &[
            "1 Cours Collectif (Samedi) par semaine",
            "2 Stages Intensifs de 5 jours inclus (Toussaint & Février)",
            "Accès illimité à toutes les fiches et annales",
            "Bilan personnalisé trimestriel",
        ],
        popular: true,
    },
    PricingPlan {
        title: "Soutien Hebdomadaire",
        price: "35€",
        duration: "/ heure",
        features: &[
            "Cours personnalisé à domicile ou en visio",
            "Suivi individualisé des lacunes",
            "Support entre les cours",
            "Fiches de révision",
        ],
        popular: false,
    },
    PricingPlan {
        title: "Stage Intensif Vacances",
        price: "350€",
        duration: "/ stage de 5 jours",
        features: &[
            "5 jours consécutifs de révision ciblée",
            "Préparation aux examens (Bac/Brevet)",
            "Méthodologie d'examen",
            "Ouvert aux élèves extérieurs",
        ],
        popular: false,
    },
    PricingPlan {
        title: "Pack 10 heures",
        price: "320€",
        duration: "au lieu de 350€",
        features: &[
            "10 heures de cours (Présentiel/Visio)",
            "Économie de 30€",
            "Validité 3 mois",
            "Idéal pour un rattrapage ciblé",
        ],
        popular: false,
    },
];

pub const METHOD_STEPS: &[MethodStep] = &[
    MethodStep {
        title: "Diagnostic Initial",
        description: "Identification des lacunes et objectifs personnalisés pour chaque élève",
    },
    MethodStep {
        title: "Explications Intuitives",
        description: "Approche pédagogique adaptée avec des exemples concrets et visuels",
    },
    MethodStep {
        title: "Exercices Ciblés",
        description: "Pratique progressive avec des exercices adaptés au niveau et aux difficultés",
    },
    MethodStep {
        title: "Suivi Régulier",
        description: "Bilans fréquents et communication avec les parents sur les progrès",
    },
];

pub const STATS: &[Stat] = &[
    Stat {
        value: "8+",
        label: "Années d'expérience",
    },
    Stat {
        value: "100+",
        label: "Élèves accompagnés",
    },
    Stat {
        value: "95%",
        label: "Taux de réussite",
    },
];

/// Direct channels the failure notification points users at.
pub const CONTACT_CHANNELS: &[ContactChannel] = &[
    ContactChannel {
        label: "Email",
        value: "soufian.bassa@gmail.com",
        href: "mailto:soufian.bassa@gmail.com",
    },
    ContactChannel {
        label: "Téléphone",
        value: "07 82 21 95 83",
        href: "tel:0782219583",
    },
    ContactChannel {
        label: "WhatsApp",
        value: "+33 7 82 21 95 83",
        href: "https://wa.me/33782219583",
    },
];

pub fn popular_plan() -> Option<&'static PricingPlan> {
    PRICING_PLANS.iter().find(|plan| plan.popular)
}
