//! Announcements for feed and preference changes

use amp_a11y::Locale;
use amp_feed::{Category, SortOrder};
use amp_prefs::FontSize;

/// Localized app announcements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppMessages {
    locale: Locale,
}

impl AppMessages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn loaded(&self, count: usize, category: Category) -> String {
        match self.locale {
            Locale::English => format!("{} articles loaded in {}", count, category.name()),
            Locale::PortugueseBrazil => {
                format!("{} notícias carregadas na categoria {}", count, category_pt(category))
            }
        }
    }

    pub fn load_failed(&self) -> String {
        match self.locale {
            Locale::English => "Could not load news. Showing examples.".into(),
            Locale::PortugueseBrazil => "Erro ao carregar notícias. Mostrando exemplos.".into(),
        }
    }

    pub fn search_results(&self, count: usize, query: &str) -> String {
        match self.locale {
            Locale::English => format!("{} results found for: {}", count, query),
            Locale::PortugueseBrazil => format!("{} resultados encontrados para: {}", count, query),
        }
    }

    pub fn search_cleared(&self) -> String {
        match self.locale {
            Locale::English => "Search cleared. Full list restored.".into(),
            Locale::PortugueseBrazil => "Busca limpa. Lista completa restaurada.".into(),
        }
    }

    pub fn skip_to_main(&self) -> String {
        match self.locale {
            Locale::English => "Moving to main content".into(),
            Locale::PortugueseBrazil => "Navegando para o conteúdo principal".into(),
        }
    }

    pub fn dark_mode(&self, on: bool) -> String {
        match (self.locale, on) {
            (Locale::English, true) => "Dark mode on".into(),
            (Locale::English, false) => "Light mode on".into(),
            (Locale::PortugueseBrazil, true) => "Modo escuro ativado".into(),
            (Locale::PortugueseBrazil, false) => "Modo claro ativado".into(),
        }
    }

    pub fn high_contrast(&self, on: bool) -> String {
        match (self.locale, on) {
            (Locale::English, true) => "High contrast on".into(),
            (Locale::English, false) => "High contrast off".into(),
            (Locale::PortugueseBrazil, true) => "Alto contraste ativado".into(),
            (Locale::PortugueseBrazil, false) => "Alto contraste desativado".into(),
        }
    }

    pub fn reduced_motion(&self, on: bool) -> String {
        match (self.locale, on) {
            (Locale::English, true) => "Reduced motion on".into(),
            (Locale::English, false) => "Animations on".into(),
            (Locale::PortugueseBrazil, true) => "Animações reduzidas ativadas".into(),
            (Locale::PortugueseBrazil, false) => "Animações ativadas".into(),
        }
    }

    pub fn auto_read(&self, on: bool) -> String {
        match (self.locale, on) {
            (Locale::English, true) => "Reading aloud on open enabled".into(),
            (Locale::English, false) => "Reading aloud on open disabled".into(),
            (Locale::PortugueseBrazil, true) => "Leitura automática ativada".into(),
            (Locale::PortugueseBrazil, false) => "Leitura automática desativada".into(),
        }
    }

    pub fn font_size(&self, size: FontSize) -> String {
        match self.locale {
            Locale::English => format!("Font size changed to {}", size.as_str()),
            Locale::PortugueseBrazil => {
                let name = match size {
                    FontSize::Small => "pequeno",
                    FontSize::Medium => "médio",
                    FontSize::Large => "grande",
                };
                format!("Tamanho da fonte alterado para {}", name)
            }
        }
    }

    pub fn category_changed(&self, category: Category) -> String {
        match self.locale {
            Locale::English => format!("Category changed to {}", category.name()),
            Locale::PortugueseBrazil => {
                format!("Categoria alterada para {}", category_pt(category))
            }
        }
    }

    pub fn sort_changed(&self, sort: SortOrder) -> String {
        match (self.locale, sort) {
            (Locale::English, SortOrder::PublishedDesc) => "Sorted by publication date".into(),
            (Locale::English, SortOrder::TitleAsc) => "Sorted by title".into(),
            (Locale::PortugueseBrazil, SortOrder::PublishedDesc) => {
                "Ordenação alterada para data de publicação".into()
            }
            (Locale::PortugueseBrazil, SortOrder::TitleAsc) => {
                "Ordenação alterada para título".into()
            }
        }
    }

    pub fn saved(&self, added: bool) -> String {
        match (self.locale, added) {
            (Locale::English, true) => "Article saved".into(),
            (Locale::English, false) => "Article removed from saved".into(),
            (Locale::PortugueseBrazil, true) => "Artigo salvo com sucesso".into(),
            (Locale::PortugueseBrazil, false) => "Artigo removido dos salvos".into(),
        }
    }

    pub fn liked(&self, added: bool) -> String {
        match (self.locale, added) {
            (Locale::English, true) => "Article liked".into(),
            (Locale::English, false) => "Like removed".into(),
            (Locale::PortugueseBrazil, true) => "Artigo curtido".into(),
            (Locale::PortugueseBrazil, false) => "Like removido".into(),
        }
    }
}

fn category_pt(category: Category) -> &'static str {
    match category {
        Category::General => "Geral",
        Category::Business => "Negócios",
        Category::Technology => "Tecnologia",
        Category::Health => "Saúde",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english() {
        let messages = AppMessages::new(Locale::English);
        assert_eq!(messages.loaded(12, Category::Health), "12 articles loaded in Health");
        assert_eq!(messages.search_results(2, "ai"), "2 results found for: ai");
        assert_eq!(messages.dark_mode(false), "Light mode on");
    }

    #[test]
    fn test_portuguese() {
        let messages = AppMessages::new(Locale::PortugueseBrazil);
        assert_eq!(messages.font_size(FontSize::Large), "Tamanho da fonte alterado para grande");
        assert_eq!(
            messages.category_changed(Category::Business),
            "Categoria alterada para Negócios"
        );
    }
}
